use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATA_FILE: &str = "todos.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub data_file: String,
}

impl Config {
    pub fn new_from_env() -> Self {
        let data_dir = env::var("KARMA_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let data_file =
            env::var("KARMA_DATA_FILE").unwrap_or_else(|_| DEFAULT_DATA_FILE.to_string());

        Self {
            data_dir: PathBuf::from(data_dir),
            data_file,
        }
    }

    pub fn todo_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            data_file: DEFAULT_DATA_FILE.to_string(),
        }
    }
}
