use nb_pipeline::Pipeline;

pub struct AppState {
    pub pipeline: Pipeline,
    /// Bearer token every trigger request must carry.
    pub trigger_token: String,
}
