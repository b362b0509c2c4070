//! Build script for departures-simulator
//!
//! On Windows, points the linker at a local SDL2 and copies SDL2.dll next to
//! the simulator binary. Other platforms use the system SDL2.

use std::path::PathBuf;
use std::{env, fs};

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let Some(workspace) = PathBuf::from(manifest_dir).parent().map(PathBuf::from) else {
        return;
    };
    let sdl2_dir = workspace.join("sdl2");
    println!("cargo:rerun-if-changed={}", sdl2_dir.display());

    if !sdl2_dir.exists() {
        println!("cargo:warning=SDL2 not found at {}", sdl2_dir.display());
        println!("cargo:warning=Place SDL2.lib and SDL2.dll there to build the simulator");
        return;
    }
    println!("cargo:rustc-link-search=native={}", sdl2_dir.display());

    // OUT_DIR is target/<profile>/build/departures-simulator-xxx/out
    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let out_path = PathBuf::from(out_dir);
    let Some(target_dir) = out_path
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
    else {
        return;
    };

    let dll_src = sdl2_dir.join("SDL2.dll");
    let dll_dst = target_dir.join("SDL2.dll");
    if dll_src.exists() && !dll_dst.exists() {
        match fs::copy(&dll_src, &dll_dst) {
            Ok(_) => println!("cargo:warning=Copied SDL2.dll to {}", dll_dst.display()),
            Err(e) => println!("cargo:warning=Failed to copy SDL2.dll: {e}"),
        }
    }
}
