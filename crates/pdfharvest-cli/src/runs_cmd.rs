use std::path::Path;

use crate::shared::open_document;

pub fn run(file: &Path, page: Option<usize>, password: Option<&str>) -> Result<(), i32> {
    let document = open_document(file, password)?;

    if let Some(number) = page {
        if number == 0 || number > document.page_count() {
            eprintln!(
                "Page {number} is out of range (document has {} pages)",
                document.page_count()
            );
            return Err(1);
        }
    }

    println!("page\ttext\tx0\ttop\tx1\tbottom");
    for page_text in document.pages() {
        if page.is_some_and(|n| n != page_text.page_number) {
            continue;
        }
        for run in &page_text.runs {
            println!(
                "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
                page_text.page_number,
                run.text,
                run.bbox.x0,
                run.bbox.top,
                run.bbox.x1,
                run.bbox.bottom,
            );
        }
    }
    Ok(())
}
