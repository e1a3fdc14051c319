use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BUNDLED_CONFIG_FILE: &str = "appConfig.json";
const EMPTY_CONFIG: &str = "{}";

fn main() {
    let source = manifest_dir().join("assets").join(BUNDLED_CONFIG_FILE);
    println!("cargo:rerun-if-changed={}", source.display());

    if let Err(error) = write_bundled_config(&source) {
        println!("cargo:warning=failed to bundle app config: {error}");
    }
}

fn write_bundled_config(source: &Path) -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::create_dir_all(&out_dir)?;

    // A missing asset still produces a file so `include_str!` resolves and
    // the runtime defaults apply.
    let content = match fs::read_to_string(source) {
        Ok(content) => content,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            println!(
                "cargo:warning={} not found; bundling an empty config",
                source.display()
            );
            EMPTY_CONFIG.to_string()
        }
        Err(error) => return Err(error),
    };

    fs::write(out_dir.join("app-config.json"), content)
}

fn manifest_dir() -> PathBuf {
    env::var_os("CARGO_MANIFEST_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from)
}
