fn main() {
  std::process::exit(training_dashboard_lib::run());
}
