//! PNG inspector backed by the image crate
//!
//! Decodes icons with a general-purpose reader, independent of the
//! encoder that wrote them, and reports their size and colour census.
//!
//! Usage: png_inspect <file.png>...

use std::collections::BTreeMap;
use std::env;
use std::process::ExitCode;

const ICON_BLUE: [u8; 4] = [33, 150, 243, 255];

fn inspect(path: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let img = image::open(path)?;
    println!("{}: {}×{} {:?}", path, img.width(), img.height(), img.color());

    let rgba = img.to_rgba8();
    let mut colours: BTreeMap<[u8; 4], u64> = BTreeMap::new();
    for pixel in rgba.pixels() {
        *colours.entry(pixel.0).or_default() += 1;
    }

    let total = rgba.width() as u64 * rgba.height() as u64;
    for (colour, count) in colours.iter().take(8) {
        println!(
            "  rgba({}, {}, {}, {}): {} px ({:.1}%)",
            colour[0],
            colour[1],
            colour[2],
            colour[3],
            count,
            *count as f64 * 100.0 / total as f64
        );
    }
    if colours.len() > 8 {
        println!("  ... {} more colours", colours.len() - 8);
    }

    let solid_blue = colours.len() == 1 && colours.contains_key(&ICON_BLUE);
    println!("  Solid icon blue: {}", if solid_blue { "yes" } else { "no" });
    Ok(solid_blue)
}

fn main() -> ExitCode {
    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: png_inspect <file.png>...");
        return ExitCode::from(2);
    }

    let mut ok = true;
    for path in &paths {
        match inspect(path) {
            Ok(solid) => ok &= solid,
            Err(e) => {
                eprintln!("{}: {}", path, e);
                ok = false;
            }
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
