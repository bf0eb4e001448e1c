use std::fs;
use std::path::{Path, PathBuf};

/// Write `contents` as `config.toml` inside `dir`.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

/// Config using a file registry stored next to the config file.
pub fn file_registry_config(dir: &Path) -> PathBuf {
    let registry = dir.join("users.txt");
    write_config(
        dir,
        &format!(
            "[registry]\nbackend = \"file\"\npath = \"{}\"\n\n[logging]\nlevel = \"error\"\n",
            registry.display().to_string().replace('\\', "/")
        ),
    )
}
