//! Output formatting helpers for object listings.

use comfy_table::{presets, ContentArrangement, Table};

use keepsake_core::RemoteObject;

/// Print a listing of remote objects as a table or JSON.
pub fn print_objects(objects: &[RemoteObject], json: bool, quiet: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(objects)?);
        return Ok(());
    }

    if objects.is_empty() {
        if !quiet {
            println!("No objects found.");
        }
        return Ok(());
    }

    if quiet {
        for object in objects {
            println!("{}", object.name);
        }
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Type", "Size", "Id"]);

    for object in objects {
        table.add_row(vec![
            object.name.clone(),
            object.mime_type.clone(),
            object
                .size
                .map(format_bytes)
                .unwrap_or_else(|| "-".to_string()),
            object.id.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Human-readable byte count (binary units).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}
