use url::Url;

pub const INDEX_HTML: &str = r#"
<html>
<head>
	<title>RTV 4D downloader</title>
	<meta name="viewport" content="width=device-width, initial-scale=1, maximum-scale=1.0, user-scalable=no">
</head>
<body style="font-family: Arial; margin: 20px; color: #333">
	<h1 style="margin: 0 0 20px; font-weight: bold; font-size: 24px">RTV 4D downloader</h1>
	<form method="post" action="/">
		<div style="margin-bottom: 4px"><label for="url" style="font-weight: bold; font-size: 13px">URL:</label></div>
		<div style="margin-bottom: 10px"><input type="url" id="url" name="url" style="font-size: 14px; padding: 8px 10px; width: 100%; border: 1px solid #333; box-shadow: none' border-radius: 0"></div>
		<button type="submit" style="display: block; width: 100%; padding: 20px 0; font-size: 15px; font-weight: bold; background-color: #fff; border: 1px solid #333">Download</button>
	</form>
</body>
</html>
"#;

pub fn render_result(title: &str, url: &str) -> String {
    let title = escape_html(title);
    let href = escape_html(safe_href(url));
    let text = escape_html(url);

    format!(
        r#"
<html>
<head>
	<title>{title}</title>
	<meta name="viewport" content="width=device-width, initial-scale=1, maximum-scale=1.0, user-scalable=no">
</head>
<body style="font-family: Arial; margin: 20px; color: #333">
	<h1 style="margin: 0 0 20px; font-weight: bold; font-size: 24px">{title}</h1>

	<p><a href="{href}">{text}</a></p>
</body>
</html>
"#
    )
}

/// Links with a scheme other than http(s) are rendered inert.
fn safe_href(url: &str) -> &str {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => url,
        _ => "#",
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(character),
        }
    }

    escaped
}
