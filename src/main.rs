fn main() {
    if let Err(e) = iontrim::app::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
