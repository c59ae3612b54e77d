use crate::{Context, Error};

/// the store bootstraps its schema on open, so there's nothing left to do.
#[tracing::instrument(skip_all)]
pub async fn init(_ctx: Context<'_>) -> Result<(), Error> {
    println!("database ready.");

    Ok(())
}

#[tracing::instrument(skip_all)]
pub async fn reset(ctx: Context<'_>, yes: bool) -> Result<(), Error> {
    if !yes {
        println!("refusing to drop every quote without --yes.");
        return Ok(());
    }

    ctx.store
        .reset()
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when resetting database"))?;

    println!("dropped every quote and vote.");

    Ok(())
}

#[tracing::instrument(skip_all)]
pub async fn stats(ctx: Context<'_>) -> Result<(), Error> {
    let count = ctx.store.count_active().await?;

    if ctx.json {
        println!("{}", serde_json::json!({ "active_quotes": count }));
    } else {
        println!("{count} active quotes.");
    }

    Ok(())
}
