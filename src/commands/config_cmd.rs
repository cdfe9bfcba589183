use serde_json::json;

use crate::config::{AlertgenConfig, OVERRIDE_ENV, Session};
use crate::error::Result;
use crate::output;

pub fn run(session: &mut Session, output_format: &str) -> Result<()> {
    let endpoint = session.endpoint().clone();
    let override_url = session.override_url().map(String::from);
    let resolved = session.resolve_url();

    if output_format == "json" || output_format == "yaml" {
        let value = json!({
            "host": endpoint.host,
            "path": endpoint.path,
            "override": override_url,
            "url": resolved,
            "last_url": session.last_url(),
            "config_file": AlertgenConfig::config_path(),
        });
        println!("{}", output::format_config(&value, output_format));
    } else {
        println!("host:        {}", endpoint.host);
        println!("path:        {}", endpoint.path);
        println!(
            "{OVERRIDE_ENV}: {}",
            override_url.as_deref().unwrap_or("(not set)")
        );
        println!("url:         {resolved}");
        println!("last used:   {}", session.last_url().unwrap_or("(none)"));
        println!(
            "config file: {}",
            AlertgenConfig::config_path().display()
        );
    }
    Ok(())
}
