use std::collections::HashMap;

/// Output of the macOS `sw_vers` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwVers {
    values: HashMap<String, String>,
}

impl SwVers {
    /// Lines without a `:` are ignored.
    pub fn parse(content: &str) -> Self {
        let values = content
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn product_name(&self) -> Option<&str> {
        self.get("ProductName")
    }

    pub fn product_version(&self) -> Option<&str> {
        self.get("ProductVersion")
    }

    pub fn build_version(&self) -> Option<&str> {
        self.get("BuildVersion")
    }
}

/// Marketing name of a macOS release.
pub fn mac_release_name(major: u32, minor: u32) -> Option<String> {
    let name = match (major, minor) {
        (26, _) => "Tahoe",
        (15, _) => "Sequoia",
        (14, _) => "Sonoma",
        (13, _) => "Ventura",
        (12, _) => "Monterey",
        (11, _) => "Big Sur",
        (10, 15) => "Catalina",
        (10, 14) => "Mojave",
        (10, 13) => "High Sierra",
        (10, 12) => "Sierra",
        (10, 11) => "El Capitan",
        (10, 10) => "Yosemite",
        (10, 9) => "Mavericks",
        (10, 8) => "Mountain Lion",
        (10, 7) => "Lion",
        (10, 6) => "Snow Leopard",
        (10, 5) => "Leopard",
        (10, 4) => "Tiger",
        (10, 3) => "Panther",
        (10, 2) => "Jaguar",
        (10, 1) => "Puma",
        (10, 0) => "Cheetah",
        (10, minor) => return Some(format!("Mac OS X 10.{minor}")),
        _ => return None,
    };
    Some(name.to_string())
}
