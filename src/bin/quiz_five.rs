use app_launcher::app::{run_fixed_target, QUIZ_FIVE};

#[tokio::main]
async fn main() {
    std::process::exit(run_fixed_target(QUIZ_FIVE).await);
}
