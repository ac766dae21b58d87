use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("vitis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pull viticulture statistics tables from Vitibrasil")
        .arg(
            clap::arg!([CATEGORY] "Category to fetch")
                .value_parser(["production", "processing", "commercialization", "import", "export"]),
        )
        .arg(clap::arg!(-y --year <YEAR> "Year of the data (default: most recent available)"))
        .arg(
            clap::arg!(-s --subcategory <NAME> "Subcategory (processing, import and export only)").value_parser([
                "viniferas",
                "americanas_hibridas",
                "uvas_mesa",
                "sem_classificacao",
                "vinhos",
                "espumantes",
                "uvas_frescas",
                "uvas_passas",
                "suco_uva",
            ]),
        )
        .arg(clap::arg!(-i --input <FILE> "Extract from a saved HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, text)")
                .default_value("json")
                .value_parser(["json", "text"]),
        )
        .arg(clap::arg!(-l --list "List categories and their subcategories"))
        .arg(clap::arg!(--"base-url" <URL> "Data source endpoint"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "vitis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "vitis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "vitis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "vitis", &completions_dir).unwrap();
}
