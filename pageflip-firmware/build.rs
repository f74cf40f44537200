//! Build script for pageflip-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml and generates the `PANEL` constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pageflip_display::PanelConfig;
use serde::Deserialize;

/// Layout of panel.toml
#[derive(Deserialize)]
struct PanelFile {
    #[serde(default)]
    panel: PanelConfig,
}

fn main() {
    setup_linker();
    generate_panel();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml and write `OUT_DIR/panel.rs`
fn generate_panel() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml file describing the OLED.    ║\n\
            ║  Please create one in the pageflip-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let file: PanelFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid panel.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let panel = file.panel;
    if let Err(e) = panel.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml rejected                                      ║\n\
            ║                                                                  ║\n\
            ║  {:<64} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format!("{:?}: {}x{} at {:#04x}", e, panel.width, panel.height, panel.address)
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let generated = format!(
        "/// Panel settings from panel.toml\n\
         pub const PANEL: PanelConfig = PanelConfig {{\n    \
             width: {},\n    \
             height: {},\n    \
             address: {:#04x},\n    \
             scl_speed_hz: {},\n    \
             contrast: {:#04x},\n    \
             settle_ms: {},\n\
         }};\n",
        panel.width,
        panel.height,
        panel.address,
        panel.scl_speed_hz,
        panel.contrast,
        panel.settle_ms,
    );
    fs::write(out_dir.join("panel.rs"), generated).unwrap();

    println!(
        "cargo:warning=panel.toml validated: {}x{} at {:#04x}",
        panel.width, panel.height, panel.address
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
