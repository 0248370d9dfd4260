use std::path::Path;

use crate::cli::commands::LoginArgs;
use crate::io::config_io;
use crate::model::AccountConfig;

/// Store credentials. Runs before credentials are resolved, so it works on
/// a fresh install.
pub fn cmd_login(args: LoginArgs, config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let user_id = args.user_id.trim();
    let api_key = args.api_key.trim();
    if user_id.is_empty() || api_key.is_empty() {
        return Err("user id and API key must not be empty".into());
    }
    let account = AccountConfig {
        user_id: user_id.to_string(),
        api_key: api_key.to_string(),
    };
    config_io::write_credentials(config_path, &account)?;
    println!("credentials saved to {}", config_path.display());
    Ok(())
}
