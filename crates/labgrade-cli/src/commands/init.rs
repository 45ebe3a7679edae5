//! The `labgrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("labgrade.toml");
    if path.exists() {
        println!("labgrade.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created labgrade.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point log_file at your lab results log");
    println!("  2. Run: labgrade events");
    println!("  3. Run: labgrade grade --format html --output report.html");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# labgrade configuration

# Log written by the lab verification scripts
log_file = "labresults.log"

# Default report format: text, json, or html
output_format = "text"

# Max persistent failures listed under recommendations
attention_limit = 5
"#;
