//! Pretty and text renderers for composed pages.

use crate::output::{
    CliError, OutputMode, pretty_kv, pretty_rule, pretty_section, render_error, render_mode,
};
use gridsphere_core::model::{Article, Comment, DirectoryItem};
use gridsphere_core::page::{ArticlePage, DirectoryPage, HomePage, Page, ProductPage};
use std::io::{self, Write};

/// Render `page`. A not-found page is reported on stderr and fails.
///
/// # Errors
///
/// Returns an error for [`Page::NotFound`] or when writing output fails.
pub fn render_page(output: OutputMode, page: &Page<'_>) -> anyhow::Result<()> {
    if let Page::NotFound(missing) = page {
        render_error(output, &CliError::from(missing))?;
        anyhow::bail!("{missing}");
    }
    render_mode(output, page, render_page_text, render_page_human)
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

fn render_page_human(page: &Page<'_>, w: &mut dyn Write) -> io::Result<()> {
    match page {
        Page::Home(home) => home_human(home, w),
        Page::Article(article) => article_human(article, w),
        Page::Directory(directory) => directory_human(directory, w),
        Page::Product(product) => product_human(product, w),
        Page::NotFound(missing) => writeln!(w, "{missing}"),
    }
}

fn render_page_text(page: &Page<'_>, w: &mut dyn Write) -> io::Result<()> {
    match page {
        Page::Home(home) => {
            writeln!(w, "page\thome\tquery\t{}\tshown\t{}/{}", home.query, home.articles.len(), home.total)?;
            for article in &home.articles {
                article_row(article, w)?;
            }
            Ok(())
        }
        Page::Article(page) => {
            let a = page.article;
            writeln!(w, "page\tarticle\tid\t{}", a.id)?;
            writeln!(w, "title\t{}", a.title)?;
            writeln!(w, "author\t{}\tdate\t{}", a.author, a.date)?;
            writeln!(w, "tags\t{}", a.tags.join(","))?;
            for paragraph in a.paragraphs() {
                writeln!(w, "p\t{paragraph}")?;
            }
            for related in &page.related {
                writeln!(w, "related\t{}\t{}", related.id, related.title)?;
            }
            for comment in &page.comments {
                comment_row(comment, w)?;
            }
            Ok(())
        }
        Page::Directory(page) => {
            writeln!(
                w,
                "page\tdirectory\tquery\t{}\tcategory\t{}\tmax_price\t{}\tshown\t{}/{}",
                page.filter.query,
                page.filter.category,
                page.filter.max_price,
                page.items.len(),
                page.total
            )?;
            for item in &page.items {
                item_row(item, w)?;
            }
            Ok(())
        }
        Page::Product(page) => {
            let item = page.item;
            writeln!(w, "page\tproduct\tid\t{}", item.id)?;
            writeln!(w, "name\t{}", item.name)?;
            writeln!(w, "category\t{}\tprice\t{}", item.category, format_price(item.price))?;
            writeln!(w, "description\t{}", item.description)?;
            for feature in &item.features {
                writeln!(w, "feature\t{feature}")?;
            }
            writeln!(w, "cta\t{}\t{}", item.cta_label, item.url)?;
            Ok(())
        }
        Page::NotFound(missing) => writeln!(w, "page\tnot_found\t{}\t{}", missing.kind, missing.id),
    }
}

pub fn article_row(article: &Article, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "{}\t{}\t{}\t{}",
        article.id, article.date, article.author, article.title
    )
}

pub fn item_row(item: &DirectoryItem, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "{}\t{}\t{}\t{}",
        item.id,
        item.category,
        format_price(item.price),
        item.name
    )
}

pub fn comment_row(comment: &Comment, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "comment\t{}\t{}\t{}\t{}",
        comment.id, comment.date, comment.name, comment.text
    )
}

fn home_human(home: &HomePage<'_>, w: &mut dyn Write) -> io::Result<()> {
    let heading = if home.query.trim().is_empty() {
        format!("Latest articles ({})", home.total)
    } else {
        format!(
            "Articles matching \"{}\" ({} of {})",
            home.query.trim(),
            home.articles.len(),
            home.total
        )
    };
    pretty_section(w, &heading)?;
    if home.articles.is_empty() {
        writeln!(w, "No articles match your search.")?;
    }
    for (i, article) in home.articles.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        writeln!(w, "{}", article.title)?;
        writeln!(w, "  {} · {} · #/article/{}", article.date, article.author, article.id)?;
        writeln!(w, "  {}", article.excerpt)?;
    }
    Ok(())
}

fn article_human(page: &ArticlePage<'_>, w: &mut dyn Write) -> io::Result<()> {
    let a = page.article;
    pretty_section(w, &a.title)?;
    pretty_kv(w, "author", &a.author)?;
    pretty_kv(w, "date", &a.date)?;
    if !a.tags.is_empty() {
        pretty_kv(w, "tags", a.tags.join(", "))?;
    }
    writeln!(w)?;
    for paragraph in a.paragraphs() {
        writeln!(w, "{paragraph}")?;
    }

    if !page.related.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Related")?;
        for related in &page.related {
            writeln!(w, "{}  (#/article/{})", related.title, related.id)?;
        }
    }

    writeln!(w)?;
    pretty_section(w, &format!("Comments ({})", page.comments.len()))?;
    if page.comments.is_empty() {
        writeln!(w, "No comments yet.")?;
    }
    for comment in &page.comments {
        comment_human(comment, w)?;
    }
    Ok(())
}

pub fn comment_human(comment: &Comment, w: &mut dyn Write) -> io::Result<()> {
    let when = comment.created_at().map_or_else(
        || comment.date.clone(),
        |ts| ts.format("%Y-%m-%d %H:%M").to_string(),
    );
    writeln!(w, "[{when}] {}: {}", comment.name, comment.text)?;
    writeln!(w, "  id: {}", comment.id)
}

fn directory_human(page: &DirectoryPage<'_>, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("Directory ({} of {})", page.items.len(), page.total),
    )?;
    pretty_kv(w, "category", page.filter.category.to_string())?;
    pretty_kv(w, "max price", format_price(page.filter.max_price))?;
    if !page.filter.query.is_empty() {
        pretty_kv(w, "search", &page.filter.query)?;
    }
    pretty_kv(w, "categories", page.categories.join(", "))?;
    pretty_rule(w)?;
    if page.items.is_empty() {
        writeln!(w, "No results. Try adjusting filters.")?;
    }
    for item in &page.items {
        writeln!(
            w,
            "{:<24} {:<10} {:>9}  {}",
            item.name,
            item.category,
            format_price(item.price),
            item.description
        )?;
    }
    Ok(())
}

fn product_human(page: &ProductPage<'_>, w: &mut dyn Write) -> io::Result<()> {
    let item = page.item;
    pretty_section(w, &item.name)?;
    pretty_kv(w, "category", &item.category)?;
    pretty_kv(w, "price", format_price(item.price))?;
    writeln!(w)?;
    writeln!(w, "{}", item.description)?;
    if !item.details.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", item.details)?;
    }
    if !item.features.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Features")?;
        for feature in &item.features {
            writeln!(w, "- {feature}")?;
        }
    }
    writeln!(w)?;
    writeln!(w, "{} → {}", item.cta_label, item.url)
}
