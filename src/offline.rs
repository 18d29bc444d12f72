use kuchiki::traits::TendrilSink as _;

/// Refuse dashboards that would load anything from outside the output directory.
pub fn assert_self_contained(html: &str, css: &str) -> anyhow::Result<()> {
    if has_remote_url(css) {
        anyhow::bail!("dashboard css references a remote url");
    }

    let doc = kuchiki::parse_html().one(html);
    for selector in ["img[src]", "script[src]", "link[href]", "iframe", "object", "embed"] {
        let Ok(nodes) = doc.select(selector) else {
            continue;
        };
        for node in nodes {
            let tag = node.name.local.to_string();
            if matches!(tag.as_str(), "iframe" | "object" | "embed") {
                anyhow::bail!("dashboard html contains <{tag}>");
            }
            let attrs = node.attributes.borrow();
            for attr in ["src", "href"] {
                if let Some(v) = attrs.get(attr) {
                    if is_remote(v) {
                        anyhow::bail!("dashboard html loads <{tag} {attr}=\"{v}\"> remotely");
                    }
                }
            }
        }
    }

    if let Ok(nodes) = doc.select("style") {
        for node in nodes {
            if has_remote_url(&node.text_contents()) {
                anyhow::bail!("dashboard <style> references a remote url");
            }
        }
    }
    Ok(())
}

fn is_remote(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("//")
}

fn has_remote_url(css: &str) -> bool {
    let lowered = css.to_ascii_lowercase().replace(['"', '\''], "");
    lowered.contains("url(http") || lowered.contains("url(//") || lowered.contains("@import")
}
