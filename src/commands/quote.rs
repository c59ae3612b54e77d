use quotebook::{AddOutcome, NewQuote, Rejection};

use crate::{commands::print_quotes, Context, Error};

#[tracing::instrument(skip(ctx))]
pub async fn add_quote(
    ctx: Context<'_>,
    content: String,
    context: String,
    author: String,
) -> Result<(), Error> {
    let quote = NewQuote::new(content, context, author);

    let outcome = ctx.store.add(&quote).await.inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when adding quote"),
    )?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        AddOutcome::Added { id } => println!("added quote #Q{id}."),
        AddOutcome::Rejected(Rejection::ForbiddenContext { context }) => {
            println!("quote not added: context \"{context}\" is forbidden.")
        }
        AddOutcome::Rejected(Rejection::Duplicate {
            similar_to,
            similarity,
        }) => println!(
            "quote not added: it is very similar to quote #Q{similar_to} ({:.0}%).",
            similarity * 100.0
        ),
    }

    Ok(())
}

#[tracing::instrument(skip(ctx))]
pub async fn delete_quote(ctx: Context<'_>, id: i64) -> Result<(), Error> {
    ctx.store.soft_delete(id).await.inspect_err(
        |e| tracing::error!(err = ?e, id, "an error occurred when deleting quote"),
    )?;

    println!("deleted quote #Q{id}.");

    Ok(())
}

#[tracing::instrument(skip(ctx))]
pub async fn get_quotes(ctx: Context<'_>, ids: Vec<i64>) -> Result<(), Error> {
    let mut quotes = ctx.store.get_by_ids(&ids).await.inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when fetching quotes"),
    )?;

    // keep the order the ids were asked in.
    quotes.sort_by_key(|q| ids.iter().position(|id| *id == q.quote.id));

    print_quotes(ctx, &quotes)
}
