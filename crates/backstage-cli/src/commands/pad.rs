use anyhow::Result;
use backstage_store::notepad::WELL_KNOWN_KEYS;
use backstage_store::Notepad;

/// Show what the pad holds, then the well-known keys still empty.
pub fn list(pad: &Notepad) -> Result<()> {
    println!("Notepad: {}\n", pad.path().display());

    for key in pad.keys() {
        let text = pad.get(key).unwrap_or_default();
        let first_line = text.lines().next().unwrap_or_default();
        println!("  {key}: {first_line}");
    }

    let unwritten: Vec<&str> = WELL_KNOWN_KEYS
        .iter()
        .copied()
        .filter(|key| pad.get(key).is_none())
        .collect();
    if !unwritten.is_empty() {
        println!("\nNot written yet: {}", unwritten.join(", "));
    }

    Ok(())
}

pub fn get(pad: &Notepad, key: &str) -> Result<()> {
    match pad.get(key) {
        Some(text) => println!("{text}"),
        None => println!("Nothing stored under {key:?}"),
    }
    Ok(())
}

pub fn set(mut pad: Notepad, key: &str, text: &str) -> Result<()> {
    pad.set(key, text)?;
    println!("✓ Saved {key} to {}", pad.path().display());
    Ok(())
}

pub fn remove(mut pad: Notepad, key: &str) -> Result<()> {
    if pad.remove(key)? {
        println!("✓ Removed {key}");
    } else {
        println!("Nothing stored under {key:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notepad.json");

        set(Notepad::load(&path).unwrap(), "dreams", "Play Red Rocks").unwrap();
        assert_eq!(Notepad::load(&path).unwrap().get("dreams"), Some("Play Red Rocks"));

        remove(Notepad::load(&path).unwrap(), "dreams").unwrap();
        assert!(Notepad::load(&path).unwrap().get("dreams").is_none());
    }
}
