use anyhow::Result;
use colored::Colorize;

use crate::post::{TemplateSet, TemplateVariant, PLACEHOLDERS};

/// Run the fields command - list available template placeholders
pub fn run() -> Result<()> {
    println!("Available template placeholders:");
    println!();

    for (name, description) in PLACEHOLDERS {
        println!("  {{{}}}  - {}", name, description);
    }

    println!();
    println!("Example template: \"<b>{{title}}</b> ({{year}})\"");
    println!();
    println!("Padding: Use {{season:02}} for zero-padded numbers (e.g., 01, 02)");
    println!();

    println!("Built-in templates use:");
    let builtin = TemplateSet::builtin()?;
    for variant in [
        TemplateVariant::Movie,
        TemplateVariant::Season,
        TemplateVariant::Episode,
    ] {
        let used: Vec<&str> = builtin.get(variant).placeholders().collect();
        println!("  {}: {}", variant.as_str().cyan(), used.join(", "));
    }

    Ok(())
}
