use anyhow::Result;

use crate::client::Client;
use crate::config::Config;

/// Print a summary of each configured class
pub async fn run(config: &Config) -> Result<()> {
    let class_ids = config.class_ids()?;
    let client = Client::from_config(config)?;

    let classes = client.fetch_classes(class_ids).await?;

    for (i, class) in classes.iter().enumerate() {
        println!("{}", class);

        if i < classes.len() - 1 {
            println!();
        }
    }

    Ok(())
}
