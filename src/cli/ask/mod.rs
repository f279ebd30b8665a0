//! Ask command - answer one question from the terminal

use crate::api::types::ChatAnswer;

pub async fn run(question: String) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_app_state_with_config(&config).await?;

    let turn = state.qa_service.answer(&question).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&ChatAnswer::new(question, turn))?
    );

    Ok(())
}
