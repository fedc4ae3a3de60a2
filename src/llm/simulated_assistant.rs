use std::time::Duration;
use tracing::info;

/// Chat assistant with canned replies. No model is called.
pub struct SimulatedAssistant {
    delay: Duration,
}

impl SimulatedAssistant {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn generate_answer(&self, message: &str, api_context: &str) -> String {
        info!(api = api_context, chars = message.len(), "Simulating assistant reply");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        format!(
            "I understand you're asking about \"{}\". Let me help you with the {} API. Here's what I know:\n\n\
             • This is a simulated response for the demo\n\
             • In the real app, I'd provide specific API guidance\n\
             • I can generate code snippets in any language\n\
             • I can create interactive forms for testing\n\n\
             Would you like me to generate some code or create a test form for you?",
            message, api_context
        )
    }
}
