//! Minimal HTML rendering for the browser pages.

use crate::file::{is_previewable, FileRecord};

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} - DevDrop</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// A page carrying a single inline message.
pub fn message_page(message: &str) -> String {
    layout(
        "DevDrop",
        &format!(
            "<p class=\"message\">{}</p>\n<p><a href=\"/login.html\">Login</a> | \
             <a href=\"/dashboard\">Dashboard</a></p>",
            escape_html(message)
        ),
    )
}

/// Login form.
pub fn login_page() -> String {
    layout(
        "Login",
        "<h1>Login</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <input name=\"username\" placeholder=\"Username\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <button type=\"submit\">Login</button>\n\
         </form>\n\
         <p>No account? <a href=\"/register.html\">Register</a></p>",
    )
}

/// Registration form.
pub fn register_page() -> String {
    layout(
        "Register",
        "<h1>Register</h1>\n\
         <form method=\"post\" action=\"/register\">\n\
         <input name=\"username\" placeholder=\"Username\" required>\n\
         <input name=\"password\" type=\"password\" placeholder=\"Password\" required>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already registered? <a href=\"/login.html\">Login</a></p>",
    )
}

/// The caller's file list with upload, preview and delete controls.
pub fn dashboard(username: &str, files: &[FileRecord]) -> String {
    let mut rows = String::new();
    for file in files {
        let name = escape_html(&file.filename);
        let encoded = urlencoding::encode(&file.filename);
        let preview = if is_previewable(&file.filename) {
            format!(" <a href=\"/preview/{encoded}\">Preview</a>")
        } else {
            String::new()
        };
        rows.push_str(&format!(
            "<li class=\"file\"><a href=\"/uploads/{encoded}\">{name}</a>{preview}\n\
             <form method=\"post\" action=\"/delete/{encoded}\" style=\"display:inline\">\
             <button type=\"submit\">Delete</button></form></li>\n"
        ));
    }

    let list = if files.is_empty() {
        "<p class=\"empty\">No files uploaded yet.</p>".to_string()
    } else {
        format!("<ul class=\"files\">\n{rows}</ul>")
    };

    layout(
        "Dashboard",
        &format!(
            "<h1>Welcome, {}</h1>\n\
             <form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n\
             <input type=\"file\" name=\"devfile\" required>\n\
             <button type=\"submit\">Upload</button>\n\
             </form>\n{}\n<p><a href=\"/logout\">Logout</a></p>",
            escape_html(username),
            list
        ),
    )
}

/// Text preview of a stored file.
pub fn preview(filename: &str, content: &str) -> String {
    layout(
        filename,
        &format!(
            "<h1>{}</h1>\n<pre class=\"preview\">{}</pre>\n<p><a href=\"/dashboard\">Back</a></p>",
            escape_html(filename),
            escape_html(content)
        ),
    )
}
