use rocket::response::content::RawHtml;
use rocket::State;

use super::gallery_view;
use crate::config::SiteConfig;

// ── Projects page ──────────────────────────────────────

/// Server-rendered project grid. The toggle is a plain link, so the page
/// works without scripts.
#[get("/obras?<sort>&<expanded>")]
pub fn projects_page(
    config: &State<SiteConfig>,
    sort: Option<&str>,
    expanded: Option<bool>,
) -> RawHtml<String> {
    let view = gallery_view(config, sort, expanded);
    RawHtml(format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Obras ejecutadas | Construcciones GUCA</title>\n\
         <link rel=\"stylesheet\" href=\"/css/styles.css\">\n</head>\n<body>\n{}\n</body>\n</html>\n",
        view.to_node().to_html()
    ))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![projects_page]
}
