//! `chorus run` handler.

use chorus_bot::{BotConfig, KeywordReaction, PollingLoop, run_polling_loop_with_config};
use chorus_core::{Post, UserId};
use chorus_error::ChorusResult;
use chorus_social::HttpTransport;
use std::path::Path;
use tracing::info;

/// Poll `account` forever, or for one printed round when `once` is set.
pub async fn run_bot(account: UserId, config_path: Option<&Path>, once: bool) -> ChorusResult<()> {
    let config = BotConfig::load_with(config_path)?;
    info!(
        account,
        reactions = config.reactions.len(),
        workers = config.assembler.workers(),
        "Starting chorus"
    );

    if !once {
        // Keyword rules from the configuration are the only reaction
        let no_extra_reaction = |_: &Post| None::<String>;
        match run_polling_loop_with_config(account, &config, no_extra_reaction).await? {}
    }

    let transport = HttpTransport::new(config.api.clone())?;
    let reaction = KeywordReaction::new(config.reactions.clone());
    let mut bot = PollingLoop::from_config(account, &config, transport, reaction)?;
    bot.prime().await?;
    let report = bot.run_round().await?;

    for post in report.posts() {
        println!(
            "{}  @{}: {}",
            post.created_at(),
            post.author().screen_name(),
            post.text()
        );
    }
    for reply in report.replies() {
        println!("-> reply to @{} ({}): {}", reply.author(), reply.post_id(), reply.text());
    }
    println!(
        "{} posts, {} replies, next round in {}s",
        report.posts().len(),
        report.replies().len(),
        report.wait().as_secs()
    );
    Ok(())
}
