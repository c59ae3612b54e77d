use crate::{Context, Error};

#[tracing::instrument(skip(ctx))]
pub async fn upvote(ctx: Context<'_>, id: i64, voter: i64) -> Result<(), Error> {
    ctx.store.up_vote(id, voter).await.inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when upvoting quote"),
    )?;

    println!("upvoted quote #Q{id}.");

    Ok(())
}

#[tracing::instrument(skip(ctx))]
pub async fn downvote(ctx: Context<'_>, id: i64, voter: i64) -> Result<(), Error> {
    ctx.store.down_vote(id, voter).await.inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when downvoting quote"),
    )?;

    println!("downvoted quote #Q{id}.");

    Ok(())
}

#[tracing::instrument(skip(ctx))]
pub async fn unvote(ctx: Context<'_>, id: i64, voter: i64) -> Result<(), Error> {
    ctx.store.remove_vote(id, voter).await.inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when removing vote"),
    )?;

    println!("removed your vote on quote #Q{id}.");

    Ok(())
}
