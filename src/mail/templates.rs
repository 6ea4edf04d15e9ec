//! Message bodies for the site's transactional email.

use super::Email;
use crate::models::Inquiry;

const SIGNATURE_TEXT: &str = "Best regards,\nDevine Senior Living Team";
const SIGNATURE_HTML: &str = "<p>Best regards,<br>Devine Senior Living Team</p>";
const NOT_PROVIDED: &str = "Not provided";

/// Escape text for inclusion in an HTML body.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn or_not_provided(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_PROVIDED)
}

/// Thank-you note sent to whoever submitted the contact form.
pub fn inquiry_confirmation(inquiry: &Inquiry) -> Email {
    let body = "Thank you for reaching out to us. We have received your inquiry and will get back to you shortly.";

    Email {
        to: inquiry.email.clone(),
        subject: "Thank you for contacting Devine Senior Living".to_string(),
        text: format!("Dear {},\n\n{}\n\n{}", inquiry.name, body, SIGNATURE_TEXT),
        html: format!(
            "<p>Dear {},</p><p>{}</p>{}",
            escape_html(&inquiry.name),
            body,
            SIGNATURE_HTML
        ),
    }
}

/// Heads-up for staff about a new contact form submission.
pub fn inquiry_notification(inquiry: &Inquiry, admin_email: &str) -> Email {
    let phone = or_not_provided(&inquiry.phone);
    let kind = or_not_provided(&inquiry.inquiry_type);
    let message = or_not_provided(&inquiry.message);

    Email {
        to: admin_email.to_string(),
        subject: "New Contact Form Submission".to_string(),
        text: format!(
            "New inquiry #{} from {}\nEmail: {}\nPhone: {}\nType: {}\nMessage: {}",
            inquiry.id, inquiry.name, inquiry.email, phone, kind, message
        ),
        html: format!(
            "<h3>New inquiry #{} from {}</h3><p>Email: {}</p><p>Phone: {}</p><p>Type: {}</p><p>Message: {}</p>",
            inquiry.id,
            escape_html(&inquiry.name),
            escape_html(&inquiry.email),
            escape_html(phone),
            escape_html(kind),
            escape_html(message)
        ),
    }
}

/// Delivery of the senior care options guide.
pub fn care_guide(to: &str, guide_url: &str) -> Email {
    Email {
        to: to.to_string(),
        subject: "Your Senior Care Options Guide".to_string(),
        text: format!(
            "Thank you for requesting our Senior Care Options Guide. You can download it here: {}",
            guide_url
        ),
        html: format!(
            "<h2>Thank you for requesting our Senior Care Options Guide</h2>\
             <p>You can download your guide using the link below:</p>\
             <p><a href=\"{}\">Download Senior Care Guide</a></p>\
             <p>If you have any questions, please don't hesitate to contact us.</p>",
            escape_html(guide_url)
        ),
    }
}
