use crate::error::{HostProbeError, Result};
use crate::models::OperatingSystem;
use crate::parsers::{Dscl, Passwd, PasswdEntry};
use crate::platform::executor::{ProbeCommand, SystemExecutor};
use serde::Serialize;
use std::path::Path;

/// A local user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub username: String,
    pub user_id: Option<u32>,
    pub group_id: Option<u32>,
    pub real_name: Option<String>,
    pub home: Option<String>,
    pub shell: Option<String>,
}

impl From<PasswdEntry> for Account {
    fn from(entry: PasswdEntry) -> Self {
        // GECOS holds "Full Name,room,phone,..."; only the name is kept.
        let real_name = entry.name.split(',').next().unwrap_or_default().trim();
        Self {
            username: entry.username,
            user_id: Some(entry.user_id),
            group_id: Some(entry.group_id),
            real_name: (!real_name.is_empty()).then(|| real_name.to_string()),
            home: (!entry.home.is_empty()).then_some(entry.home),
            shell: (!entry.shell.is_empty()).then_some(entry.shell),
        }
    }
}

/// Looks `username` up in the passwd database, then through `dscl` on
/// macOS where most accounts live in Directory Services instead.
pub(crate) fn lookup(
    executor: &dyn SystemExecutor,
    passwd_path: &Path,
    os: Option<OperatingSystem>,
    username: &str,
) -> Option<Account> {
    if os == Some(OperatingSystem::Windows) {
        log::debug!("No account database to consult on Windows");
        return None;
    }

    match from_passwd(executor, passwd_path, username) {
        Ok(Some(account)) => {
            log::debug!("Found {username} in {passwd_path:?}");
            return Some(account);
        }
        Ok(None) => log::debug!("{username} is not listed in {passwd_path:?}"),
        Err(e) => log::debug!("Unable to read {passwd_path:?}: {e}"),
    }

    if os == Some(OperatingSystem::MacOS) {
        match from_dscl(executor, username) {
            Ok(account) => return Some(account),
            Err(e) => log::warn!("Unable to read dscl output for {username}: {e}"),
        }
    }

    None
}

fn from_passwd(
    executor: &dyn SystemExecutor,
    passwd_path: &Path,
    username: &str,
) -> Result<Option<Account>> {
    let passwd = Passwd::parse(&executor.read_file(passwd_path)?);
    Ok(passwd.find_by_username(username).cloned().map(Account::from))
}

fn from_dscl(executor: &dyn SystemExecutor, username: &str) -> Result<Account> {
    let command = ProbeCommand::new("dscl")
        .arg(".")
        .arg("-read")
        .arg(format!("/Users/{username}"));
    let dscl = Dscl::parse(&executor.exec_success(&command)?);

    if dscl == Dscl::default() {
        return Err(HostProbeError::NotDetected(format!("account {username}")));
    }

    Ok(Account {
        username: username.to_string(),
        user_id: dscl.unique_id,
        group_id: dscl.primary_group_id,
        real_name: dscl.real_name,
        home: dscl.home_dir,
        shell: dscl.shell,
    })
}
