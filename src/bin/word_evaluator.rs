use english_coach::capabilities::WordUsageEvaluator;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    english_coach::handler::run(WordUsageEvaluator).await
}
