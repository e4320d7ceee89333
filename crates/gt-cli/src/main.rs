fn main() {
    gt_cli::init_tracing();
    std::process::exit(gt_cli::run_cli_from_args(std::env::args_os()));
}
