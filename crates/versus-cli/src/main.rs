fn main() {
    versus_cli::run_main();
}
