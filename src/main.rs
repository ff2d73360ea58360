fn main() {
    #[cfg(feature = "cli")]
    rasterdelta::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("rasterdelta: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
