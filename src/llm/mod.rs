mod simulated_assistant;

pub use simulated_assistant::SimulatedAssistant;
