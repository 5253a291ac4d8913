use app_launcher::app::{run_fixed_target, QUIZ_TWO};

#[tokio::main]
async fn main() {
    std::process::exit(run_fixed_target(QUIZ_TWO).await);
}
