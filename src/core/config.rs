use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub ollama_host: String,
    pub chat_model: String,
    pub vision_model: String,
    pub prompt_file_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let ollama_host = env::var("PARLEY_OLLAMA_HOST")
            .unwrap_or_else(|_| "http://127.0.0.1:11434".to_string());
        let chat_model = env::var("PARLEY_CHAT_MODEL").unwrap_or_else(|_| "llama3".to_string());
        let vision_model =
            env::var("PARLEY_VISION_MODEL").unwrap_or_else(|_| "llava:7b-v1.6".to_string());
        let prompt_file_path =
            env::var("PARLEY_PROMPT_FILE").unwrap_or_else(|_| "./prompt.json".to_string());

        Self {
            ollama_host,
            chat_model,
            vision_model,
            prompt_file_path,
        }
    }
}
