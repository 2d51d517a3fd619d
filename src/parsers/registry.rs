use std::collections::BTreeMap;

/// One `NAME  REG_TYPE  VALUE` line of `reg query` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryValue {
    pub name: String,
    pub kind: String,
    pub value: Option<String>,
}

/// Values listed by `reg query <key>`, looked up case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryQuery {
    values: BTreeMap<String, RegistryValue>,
}

impl RegistryQuery {
    pub fn parse(output: &str) -> Self {
        let mut values = BTreeMap::new();

        for line in output.lines().map(str::trim) {
            if line.is_empty() || line.starts_with("HKEY_") {
                continue;
            }
            let Some(type_start) = line.find("REG_") else {
                log::warn!("Unexpected reg query line: {line}");
                continue;
            };

            let name = line[..type_start].trim();
            let rest = &line[type_start..];
            let (kind, raw_value) = match rest.split_once(char::is_whitespace) {
                Some((kind, value)) => (kind, Some(value.trim()).filter(|v| !v.is_empty())),
                None => (rest, None),
            };

            let value = match raw_value {
                Some(raw) => match convert_value(kind, raw) {
                    Some(value) => Some(value),
                    None => {
                        log::warn!("Unable to parse {kind} value in reg query line: {line}");
                        continue;
                    }
                },
                None => None,
            };

            values.insert(
                name.to_lowercase(),
                RegistryValue {
                    name: name.to_string(),
                    kind: kind.to_string(),
                    value,
                },
            );
        }

        Self { values }
    }

    pub fn entry(&self, name: &str) -> Option<&RegistryValue> {
        self.values.get(&name.to_lowercase())
    }

    /// Value of `name`; `None` when the name is missing or carries no data.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name).and_then(|entry| entry.value.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryValue> {
        self.values.values()
    }
}

/// Integer types are reported in hex (`0x1`) and converted to decimal.
fn convert_value(kind: &str, raw: &str) -> Option<String> {
    if kind.eq_ignore_ascii_case("REG_DWORD") || kind.eq_ignore_ascii_case("REG_QWORD") {
        let hex = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);
        u64::from_str_radix(hex, 16).ok().map(|n| n.to_string())
    } else {
        Some(raw.to_string())
    }
}
