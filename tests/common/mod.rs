use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

#[allow(dead_code)]
pub fn temp_data_dir_with_csv(name: &str, contents: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    fs::write(temp_dir.path().join(name), contents).expect("failed to write csv");
    temp_dir
}
