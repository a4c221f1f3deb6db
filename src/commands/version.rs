//! `prodimg version`: build and built-in defaults

use crate::config::Config;
use crate::error::Result;

pub fn run() -> Result<()> {
    for line in summary(&Config::default()) {
        println!("{line}");
    }
    Ok(())
}

fn summary(defaults: &Config) -> Vec<String> {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };

    vec![
        format!("prodimg {} ({profile})", env!("CARGO_PKG_VERSION")),
        format!("  rust >= {}", env!("CARGO_PKG_RUST_VERSION")),
        String::new(),
        "Defaults:".to_string(),
        format!("  workbook:   {}", defaults.workbook.display()),
        format!("  output_dir: {}", defaults.output_dir.display()),
        format!("  backup_dir: {}", defaults.backup_dir().display()),
        format!("  sku_map:    {} built-in entries", defaults.sku_map.len()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_defaults() {
        let lines = summary(&Config::default());

        assert!(lines[0].starts_with(&format!("prodimg {}", env!("CARGO_PKG_VERSION"))));
        assert!(lines.contains(&"  workbook:   Productos-1.xlsx".to_string()));
        assert!(lines.contains(&"  backup_dir: public/images/products_backup".to_string()));
        assert!(lines.contains(&"  sku_map:    37 built-in entries".to_string()));
    }
}
