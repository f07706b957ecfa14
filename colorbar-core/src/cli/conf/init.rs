use crate::conf::write_default_config;
use std::path::PathBuf;

pub fn init(path: PathBuf) -> anyhow::Result<()> {
    write_default_config(&path)?;
    println!("✔ wrote {}", path.display());
    println!();
    println!("Next steps:");
    println!("  colorbar config check {}", path.display());
    println!("  colorbar serve --config {}", path.display());
    Ok(())
}
