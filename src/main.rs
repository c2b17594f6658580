fn main() {
    if let Err(err) = wireroute::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
