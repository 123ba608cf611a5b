//! `gs comment` and `gs comments`: post, delete and list article comments.

use crate::context::open_site;
use crate::output::{CliError, OutputMode, pretty_section, render, render_error, render_mode};
use crate::view::{comment_human, comment_row};
use clap::{Args, Subcommand};
use gridsphere_core::model::Comment;
use gridsphere_core::route::Route;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct CommentArgs {
    #[command(subcommand)]
    pub command: CommentCommand,
}

#[derive(Subcommand, Debug)]
pub enum CommentCommand {
    #[command(
        about = "Post a comment on an article",
        after_help = "EXAMPLES:\n    # Post under a name\n    gs comment add edge-compute-patterns \"Great overview\" --name Ada\n\n    # Post anonymously\n    gs comment add edge-compute-patterns \"Thanks!\""
    )]
    Add(CommentAddArgs),

    #[command(
        about = "Delete a comment from an article",
        after_help = "EXAMPLES:\n    # Remove a comment by id\n    gs comment rm edge-compute-patterns 3f2a9c1e-0000-4000-8000-000000000000"
    )]
    Rm(CommentRmArgs),
}

#[derive(Args, Debug)]
pub struct CommentAddArgs {
    /// Article to comment on.
    pub article_id: String,

    /// Comment text. Leading and trailing whitespace is dropped.
    pub body: String,

    /// Display name. Blank means "Anonymous".
    #[arg(short, long, default_value = "")]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct CommentRmArgs {
    pub article_id: String,
    pub comment_id: String,
}

#[derive(Args, Debug)]
pub struct CommentsArgs {
    /// Article whose thread to show, newest first.
    pub article_id: String,
}

#[derive(Debug, Serialize)]
struct CommentAddOutput {
    ok: bool,
    article_id: String,
    comment: Comment,
}

#[derive(Debug, Serialize)]
struct CommentRmOutput {
    ok: bool,
    article_id: String,
    comment_id: String,
    removed: bool,
}

#[derive(Debug, Serialize)]
struct CommentsOutput {
    article_id: String,
    comments: Vec<Comment>,
}

pub fn run_comment(args: &CommentArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    match &args.command {
        CommentCommand::Add(add) => run_comment_add(add, output, project_root),
        CommentCommand::Rm(rm) => run_comment_rm(rm, output, project_root),
    }
}

fn run_comment_add(
    args: &CommentAddArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let fragment = Route::Article(args.article_id.clone()).fragment();
    let mut site = open_site(project_root, &fragment, output)?;

    let comment = match site.add_comment(&args.article_id, &args.name, &args.body) {
        Ok(comment) => comment,
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            anyhow::bail!("{e}");
        }
    };

    let result = CommentAddOutput {
        ok: true,
        article_id: args.article_id.clone(),
        comment,
    };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "✓ {}: comment {} by {}",
            r.article_id, r.comment.id, r.comment.name
        )
    })
}

fn run_comment_rm(
    args: &CommentRmArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let fragment = Route::Article(args.article_id.clone()).fragment();
    let mut site = open_site(project_root, &fragment, output)?;
    if let Err(e) = site.content().get_article(&args.article_id) {
        render_error(output, &CliError::from(&e))?;
        anyhow::bail!("{e}");
    }

    let removed = site.delete_comment(&args.article_id, &args.comment_id);
    let result = CommentRmOutput {
        ok: true,
        article_id: args.article_id.clone(),
        comment_id: args.comment_id.clone(),
        removed,
    };
    render(output, &result, |r, w| {
        if r.removed {
            writeln!(w, "✓ {}: comment {} deleted", r.article_id, r.comment_id)
        } else {
            writeln!(w, "{}: no comment {}", r.article_id, r.comment_id)
        }
    })
}

/// # Errors
///
/// Returns an error if the project cannot be loaded or the article does not
/// exist.
pub fn run_comments(args: &CommentsArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let fragment = Route::Article(args.article_id.clone()).fragment();
    let mut site = open_site(project_root, &fragment, output)?;
    if let Err(e) = site.content().get_article(&args.article_id) {
        render_error(output, &CliError::from(&e))?;
        anyhow::bail!("{e}");
    }

    let result = CommentsOutput {
        article_id: args.article_id.clone(),
        comments: site.comments(&args.article_id).to_vec(),
    };
    render_mode(
        output,
        &result,
        |r, w| {
            for comment in &r.comments {
                comment_row(comment, w)?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(w, &format!("Comments on {} ({})", r.article_id, r.comments.len()))?;
            if r.comments.is_empty() {
                writeln!(w, "No comments yet.")?;
            }
            for comment in &r.comments {
                comment_human(comment, w)?;
            }
            Ok(())
        },
    )
}
