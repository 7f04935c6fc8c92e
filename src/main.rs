use std::{env, path::PathBuf, process};

use mhx2babylon::convert::convert_mhx2_to_babylon;

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: mhx2babylon <input.mhx2> [output.babylon]");
        process::exit(2);
    }

    let input = PathBuf::from(&args[1]);
    let output = match args.get(2) {
        Some(path) => PathBuf::from(path),
        None => input.with_extension("babylon"),
    };

    let report = convert_mhx2_to_babylon(&input, &output)?;

    println!("Wrote {}", output.display());
    println!(
        "Meshes: {}, Materials: {}, Bones: {}",
        report.mesh_count, report.material_count, report.bone_count
    );
    println!(
        "Vertices: {}, Triangles: {}",
        report.total_vertices, report.total_triangles
    );
    for issue in &report.issues {
        println!("[{:?}] {}", issue.severity, issue.message);
    }

    Ok(())
}
