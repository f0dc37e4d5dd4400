fn main() {
    if let Err(err) = smart_wallet::cli::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
