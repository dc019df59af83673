use crate::images::SessionImages;
use crate::render::{escape, layout};
use crate::sessions::CookingSession;
use crate::stats::DashboardStats;

const SESSION_NOT_FOUND: &str = "session-not-found";

pub struct DashboardView<'a> {
    pub stats: &'a DashboardStats,
    pub images: &'a SessionImages,
    /// `error` query flag, e.g. after a redirect from a missing session.
    pub error: Option<&'a str>,
}

pub fn dashboard_page(view: &DashboardView<'_>) -> String {
    let mut body = String::new();

    if let Some(flag) = view.error {
        let message = if flag == SESSION_NOT_FOUND {
            String::from("That cooking session could not be found.")
        } else {
            format!("Something went wrong ({}).", escape(flag))
        };
        body.push_str(&format!("<div class=\"banner\">{message}</div>\n"));
    }

    body.push_str("<div class=\"stats\">\n");
    body.push_str(&format!(
        "<section><h2>Sessions</h2><p class=\"total\">{}</p></section>\n",
        view.stats.total_sessions
    ));
    body.push_str("<section><h2>Cooking styles</h2><ul>");
    for (style, count) in &view.stats.style_counts {
        body.push_str(&format!("<li>{} ({count})</li>", escape(style)));
    }
    body.push_str("</ul></section>\n");
    body.push_str("<section><h2>Ingredients</h2><ul>");
    for name in view.stats.ingredients() {
        body.push_str(&format!("<li>{}</li>", escape(name)));
    }
    body.push_str("</ul></section>\n</div>\n");

    if view.stats.months.is_empty() {
        body.push_str("<p class=\"empty\">No cooking sessions recorded yet.</p>\n");
    }
    for group in &view.stats.months {
        body.push_str(&format!(
            "<h2 class=\"month\">{}</h2>\n<div class=\"cards\">\n",
            escape(&group.label)
        ));
        for session in &group.sessions {
            body.push_str(&session_card(session, view.images));
        }
        body.push_str("</div>\n");
    }

    layout("Cooking Dashboard", &body)
}

fn session_card(session: &CookingSession, images: &SessionImages) -> String {
    let n = session.session_number;
    let thumbnail = images
        .thumbnail(n)
        .unwrap_or(&session.thumbnail_image_path);
    format!(
        "<article class=\"card\" id=\"session-{n}\">\
         <a href=\"/dashboard/session/{n}\"><img src=\"{thumb}\" alt=\"Session {n}\"></a>\
         <div class=\"body\"><h3>Session #{n}</h3><p class=\"when\">{when}</p>\
         <p class=\"style\">{style}</p><p class=\"ingredients\">{ingredients}</p>\
         <p class=\"description\">{description}</p><p class=\"photos\">{photos} photo(s)</p></div>\
         </article>\n",
        thumb = escape(thumbnail),
        when = when(session),
        style = escape(session.style_label()),
        ingredients = escape(&session.ingredients_label()),
        description = escape(&session.dish_description),
        photos = images.all_for(n).len(),
    )
}

fn when(session: &CookingSession) -> String {
    session
        .date_time
        .as_ref()
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| String::from("Unknown time"))
}

const SERIES_SCRIPT: &str = r#"<script>
const sessionNumber = __SESSION__;
for (const kind of ["temperature", "motion"]) {
  fetch(`/dashboard/api/${kind}/${sessionNumber}`)
    .then((r) => r.json())
    .then((rows) => {
      const body = document.querySelector(`#${kind} tbody`);
      for (const row of rows) {
        const tr = document.createElement("tr");
        const value = typeof row.value === "number"
          ? `${row.value.toFixed(2)} °C`
          : (row.value ? "motion" : "still");
        tr.innerHTML = `<td>${row.datetime}</td><td>${value}</td>`;
        body.appendChild(tr);
      }
    });
}
</script>"#;

pub fn session_page(session: &CookingSession, images: &[String]) -> String {
    let n = session.session_number;
    let mut body = String::new();
    body.push_str(&format!(
        "<p><a href=\"/dashboard\">&larr; Back to dashboard</a></p>\n\
         <h2>Session #{n}</h2>\n\
         <img class=\"hero\" src=\"{thumb}\" alt=\"Session {n}\">\n\
         <dl>\
         <dt>When</dt><dd>{when}</dd>\
         <dt>Style</dt><dd>{style}</dd>\
         <dt>Description</dt><dd>{description}</dd>\
         </dl>\n",
        thumb = escape(session.thumbnail()),
        when = when(session),
        style = escape(session.style_label()),
        description = escape(&session.dish_description),
    ));

    body.push_str("<h3>Ingredients</h3>\n<ul class=\"ingredients\">");
    if session.ingredients.is_empty() {
        body.push_str(&format!("<li>{}</li>", escape(&session.ingredients_label())));
    }
    for ingredient in session.distinct_ingredients() {
        body.push_str(&format!("<li>{}</li>", escape(ingredient)));
    }
    body.push_str("</ul>\n");

    body.push_str(&format!("<h3>Photos ({})</h3>\n<div class=\"gallery\">", images.len()));
    for url in images {
        let url = escape(url);
        body.push_str(&format!("<a href=\"{url}\"><img src=\"{url}\" alt=\"\"></a>"));
    }
    body.push_str("</div>\n");

    for (kind, heading) in [("temperature", "Temperature (°C)"), ("motion", "Motion")] {
        body.push_str(&format!(
            "<h3>{heading}</h3>\n<table id=\"{kind}\"><thead><tr><th>Time</th><th>Value</th></tr>\
             </thead><tbody></tbody></table>\n"
        ));
    }
    body.push_str(&SERIES_SCRIPT.replace("__SESSION__", &n.to_string()));

    layout(&format!("Session #{n}"), &body)
}

pub fn sessions_page(
    sessions: &[CookingSession],
    stats: &DashboardStats,
    images: &SessionImages,
) -> String {
    let mut body = format!("<h2>All sessions ({})</h2>\n", stats.total_sessions);

    body.push_str("<div class=\"stats\">\n<section><h3>Styles</h3><table class=\"style-counts\">");
    for (style, count) in &stats.style_counts {
        body.push_str(&format!("<tr><td>{}</td><td>{count}</td></tr>", escape(style)));
    }
    body.push_str("</table></section>\n");
    body.push_str("<section><h3>Ingredients</h3><table class=\"ingredient-counts\">");
    for (name, count) in &stats.ingredient_counts {
        body.push_str(&format!("<tr><td>{}</td><td>{count}</td></tr>", escape(name)));
    }
    body.push_str("</table></section>\n</div>\n");

    body.push_str(
        "<table class=\"sessions\"><thead><tr><th>#</th><th>When</th><th>Style</th>\
         <th>Ingredients</th><th>Photos</th></tr></thead><tbody>",
    );
    for session in sessions {
        let n = session.session_number;
        body.push_str(&format!(
            "<tr><td><a href=\"/dashboard/session/{n}\">{n}</a></td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td></tr>",
            when(session),
            escape(session.style_label()),
            escape(&session.ingredients_label()),
            images.all_for(n).len(),
        ));
    }
    body.push_str("</tbody></table>\n");

    layout("Cooking Sessions", &body)
}
