fn main() {
    if let Err(err) = stackflow::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
