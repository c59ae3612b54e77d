use crate::{commands::print_quotes, Context, Error};

#[tracing::instrument(skip(ctx))]
pub async fn last(ctx: Context<'_>, n: u32) -> Result<(), Error> {
    let quotes = ctx.store.last(n).await?;

    print_quotes(ctx, &quotes)
}

#[tracing::instrument(skip(ctx))]
pub async fn random(ctx: Context<'_>, n: u32) -> Result<(), Error> {
    let quotes = ctx.store.random(n).await?;

    print_quotes(ctx, &quotes)
}

#[tracing::instrument(skip(ctx))]
pub async fn top(ctx: Context<'_>, n: u32) -> Result<(), Error> {
    let quotes = ctx.store.top(n).await?;

    print_quotes(ctx, &quotes)
}

#[tracing::instrument(skip(ctx))]
pub async fn flop(ctx: Context<'_>, n: u32) -> Result<(), Error> {
    let quotes = ctx.store.flop(n).await?;

    print_quotes(ctx, &quotes)
}

#[tracing::instrument(skip(ctx))]
pub async fn search(ctx: Context<'_>, expression: String, n: u32) -> Result<(), Error> {
    let quotes = ctx.store.search_substring(&expression, n).await?;

    print_quotes(ctx, &quotes)
}

#[tracing::instrument(skip(ctx))]
pub async fn fuzzy(ctx: Context<'_>, expression: String, n: u32) -> Result<(), Error> {
    let quotes = ctx.store.search_fuzzy(&expression, n).await?;

    print_quotes(ctx, &quotes)
}
