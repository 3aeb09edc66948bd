//! HTML extraction rules for temp-mail pages.
//!
//! Every selector that depends on the site's markup lives here, so a layout
//! change on temp-mail touches this module only.

use crate::{Error, InboxRow, Result};
use scraper::{ElementRef, Html, Selector};

const DOMAIN_SELECT: &str = "#domain";
const DOMAIN_OPTIONS: &str = "#domain > option";
const ADDRESS_INPUT: &str = "#mail";
const INBOX_ROWS: &str = "#mails tbody tr";
const ROW_LINKS: &str = "a";
const MESSAGE_BODY: &str = ".pm-text";

/// Body text the site renders in place of a message that no longer exists.
pub const MESSAGE_NOT_FOUND: &str = "Message not found!";

/// Extract the `@domain` suffixes offered by the domain select control.
///
/// Options without a `value` attribute fall back to their text. The list is
/// returned as found: neither deduplicated nor validated.
pub(crate) fn domains(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    if select_first(&document, DOMAIN_SELECT).is_none() {
        return Err(Error::DomainParse);
    }
    let options = Selector::parse(DOMAIN_OPTIONS).map_err(|_| Error::DomainParse)?;

    let domains = document
        .select(&options)
        .map(|option| match option.value().attr("value") {
            Some(value) => value.trim().to_string(),
            None => text(option),
        })
        .collect();

    Ok(domains)
}

/// Extract the mailbox address echoed in the address input.
///
/// An input without a value counts as missing.
pub(crate) fn mailbox_address(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let input = select_first(&document, ADDRESS_INPUT).ok_or(Error::AddressParse)?;
    let address = input.value().attr("value").unwrap_or_default().trim();
    if address.is_empty() {
        return Err(Error::AddressParse);
    }
    Ok(address.to_string())
}

/// Extract inbox rows from the message table, in table order.
///
/// The first row is the table header and is always dropped. Rows need a sender
/// link followed by a subject link; anything shorter is skipped. A page
/// without the table yields no rows.
pub(crate) fn inbox(html: &str) -> Vec<InboxRow> {
    let document = Html::parse_document(html);
    let (Ok(rows), Ok(links)) = (Selector::parse(INBOX_ROWS), Selector::parse(ROW_LINKS)) else {
        return Vec::new();
    };

    document
        .select(&rows)
        .skip(1)
        .filter_map(|row| {
            let mut anchors = row.select(&links);
            let sender = anchors.next()?;
            let subject = anchors.next()?;
            Some(InboxRow {
                sender: text(sender),
                subject: text(subject),
                read_url: sender
                    .value()
                    .attr("href")
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            })
        })
        .collect()
}

/// Extract the inner markup of the message body.
///
/// Fails with [`Error::MessageNotFound`] when the body is the site's
/// not-found sentinel.
pub(crate) fn message_body(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let body = select_first(&document, MESSAGE_BODY)
        .ok_or(Error::MessageParse)?
        .inner_html();

    if body == MESSAGE_NOT_FOUND {
        return Err(Error::MessageNotFound);
    }
    Ok(body)
}

fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INBOX_PAGE: &str = r#"
        <html><body>
          <input id="mail" type="text" value="  alice@example.com ">
          <table id="mails">
            <tbody>
              <tr><th>Sender</th><th>Subject</th><th>View</th></tr>
              <tr>
                <td><a href=" https://temp-mail.org/en/view/aaa ">Billing &lt;billing@shop.test&gt;</a></td>
                <td><a href="https://temp-mail.org/en/view/aaa"> Invoice #1 </a></td>
              </tr>
              <tr>
                <td><a href="https://temp-mail.org/en/view/bbb">Friend</a></td>
                <td><a href="https://temp-mail.org/en/view/bbb">Hello</a></td>
              </tr>
              <tr><td>no links here</td></tr>
            </tbody>
          </table>
        </body></html>
    "#;

    #[test]
    fn domains_reads_option_values_in_order() {
        let html = r#"
            <select id="domain">
              <option value=" @example.com ">example.com</option>
              <option value="@mail.test">mail.test</option>
              <option>@fallback.test</option>
              <option value="@example.com">example.com</option>
            </select>
        "#;

        let domains = domains(html).unwrap();
        assert_eq!(
            domains,
            vec!["@example.com", "@mail.test", "@fallback.test", "@example.com"]
        );
    }

    #[test]
    fn domains_without_select_is_parse_error() {
        let result = domains("<html><body><p>maintenance</p></body></html>");
        assert!(matches!(result, Err(Error::DomainParse)));
    }

    #[test]
    fn empty_select_yields_no_domains() {
        let domains = domains(r#"<select id="domain"></select>"#).unwrap();
        assert!(domains.is_empty());
    }

    #[test]
    fn mailbox_address_is_trimmed() {
        assert_eq!(mailbox_address(INBOX_PAGE).unwrap(), "alice@example.com");
    }

    #[test]
    fn mailbox_address_missing_input_is_parse_error() {
        let result = mailbox_address("<html><body></body></html>");
        assert!(matches!(result, Err(Error::AddressParse)));
    }

    #[test]
    fn mailbox_address_empty_value_is_parse_error() {
        let without_value = mailbox_address(r#"<input id="mail" type="text">"#);
        assert!(matches!(without_value, Err(Error::AddressParse)));

        let blank_value = mailbox_address(r#"<input id="mail" value="   ">"#);
        assert!(matches!(blank_value, Err(Error::AddressParse)));
    }

    #[test]
    fn inbox_skips_header_and_incomplete_rows() {
        let rows = inbox(INBOX_PAGE);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sender, "Billing <billing@shop.test>");
        assert_eq!(rows[0].subject, "Invoice #1");
        assert_eq!(rows[0].read_url, "https://temp-mail.org/en/view/aaa");
        assert_eq!(rows[1].sender, "Friend");
        assert_eq!(rows[1].subject, "Hello");
    }

    #[test]
    fn inbox_header_only_is_empty() {
        let html = r#"<table id="mails"><tbody><tr><th>Sender</th></tr></tbody></table>"#;
        assert!(inbox(html).is_empty());
    }

    #[test]
    fn inbox_without_table_is_empty() {
        assert!(inbox("<html><body></body></html>").is_empty());
    }

    #[test]
    fn message_body_returns_inner_markup() {
        let html = r#"<div class="pm-text"><p>Hi <b>there</b></p></div>"#;
        assert_eq!(message_body(html).unwrap(), "<p>Hi <b>there</b></p>");
    }

    #[test]
    fn message_body_sentinel_is_not_found() {
        let html = r#"<div class="pm-text">Message not found!</div>"#;
        assert!(matches!(message_body(html), Err(Error::MessageNotFound)));
    }

    #[test]
    fn message_body_missing_element_is_parse_error() {
        assert!(matches!(message_body("<div></div>"), Err(Error::MessageParse)));
    }
}
