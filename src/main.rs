fn main() {
    scheme_preview::cli::run();
}
