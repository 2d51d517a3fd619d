/// Attributes from `dscl . -read /Users/<name>` on macOS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dscl {
    pub home_dir: Option<String>,
    pub shell: Option<String>,
    pub real_name: Option<String>,
    pub unique_id: Option<u32>,
    pub primary_group_id: Option<u32>,
}

impl Dscl {
    pub fn parse(content: &str) -> Self {
        let mut dscl = Self::default();
        let mut lines = content.lines().peekable();

        while let Some(line) = lines.next() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            // Attribute lines start in column zero; continuation lines are indented.
            if key.starts_with(char::is_whitespace) {
                continue;
            }
            let value = value.trim();

            match key {
                "NFSHomeDirectory" => dscl.home_dir = non_empty(value),
                "UserShell" => dscl.shell = non_empty(value),
                "UniqueID" => dscl.unique_id = parse_id(key, value),
                "PrimaryGroupID" => dscl.primary_group_id = parse_id(key, value),
                "RealName" if value.is_empty() => {
                    // Long values are printed on the following indented line.
                    if let Some(next) = lines.next_if(|next| next.starts_with(char::is_whitespace)) {
                        dscl.real_name = non_empty(next.trim());
                    }
                }
                "RealName" => dscl.real_name = Some(value.to_string()),
                _ => {}
            }
        }

        dscl
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_id(key: &str, value: &str) -> Option<u32> {
    match value.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            log::debug!("Ignoring non-numeric dscl {key}: {value}");
            None
        }
    }
}
