use anyhow::Result;

use crate::core::AppConfig;
use crate::ollama;

pub async fn run(config: AppConfig) -> Result<()> {
    let models = ollama::list_models(&config.ollama_host).await?;
    for model in models {
        println!("{}", model);
    }
    Ok(())
}
