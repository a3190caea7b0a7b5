pub mod canvas;
pub mod layout;
pub mod merge;
pub mod metrics;

use std::path::{Path, PathBuf};

use crate::error::DeclaraError;
use crate::model::{OrderRecord, Party};
use canvas::{Canvas, Font};
use layout::Layout;
use metrics::helvetica_width;

/// File name of the declaration form shipped next to the binary.
pub const DEFAULT_TEMPLATE: &str = "Formulario Declaracao de Conteudo - A4.pdf";

/// City printed on the signature line.
pub const DECLARATION_CITY: &str = "São Paulo";

pub const BODY_FONT_SIZE: f32 = 10.0;
pub const ITEM_FONT_SIZE: f32 = 9.0;
pub const SEPARATOR_WIDTH: f32 = 0.5;

pub const NAME_MAX_CHARS: usize = 50;
pub const ADDRESS_MAX_CHARS: usize = 60;
pub const ITEMS_PER_COLUMN: usize = 15;
pub const MAX_ITEMS: usize = 2 * ITEMS_PER_COLUMN;
pub const COLUMN_1_NAME_MAX_CHARS: usize = 45;
pub const COLUMN_2_NAME_MAX_CHARS: usize = 30;

/// How an address that does not fit its field is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddressStyle {
    /// Break into two lines, the second at the field's return position.
    #[default]
    Wrap,
    /// Single line cut to [`ADDRESS_MAX_CHARS`] characters.
    Truncate,
}

/// A declaration form loaded into memory.
#[derive(Debug, Clone)]
pub struct Template {
    pub source: PathBuf,
    pub bytes: Vec<u8>,
}

impl Template {
    pub fn open(path: &Path) -> Result<Template, DeclaraError> {
        let bytes = std::fs::read(path).map_err(|e| DeclaraError::TemplateLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Template {
            source: path.to_path_buf(),
            bytes,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Template {
        Template {
            source: PathBuf::from("<memory>"),
            bytes,
        }
    }
}

/// Draws an [`OrderRecord`] onto the declaration template.
#[derive(Debug, Clone, Default)]
pub struct DeclarationRenderer {
    pub layout: Layout,
    pub address_style: AddressStyle,
}

impl DeclarationRenderer {
    pub fn new(layout: Layout) -> Self {
        DeclarationRenderer {
            layout,
            address_style: AddressStyle::default(),
        }
    }

    pub fn with_address_style(mut self, style: AddressStyle) -> Self {
        self.address_style = style;
        self
    }

    /// Render the declaration, or `None` if the template cannot be used.
    ///
    /// The reason for a `None` is logged; use [`Self::try_render`] to get it.
    pub fn render(&self, record: &OrderRecord, template: &Template) -> Option<Vec<u8>> {
        match self.try_render(record, template) {
            Ok(pdf) => Some(pdf),
            Err(e) => {
                tracing::warn!(template = %template.source.display(), error = %e, "no declaration rendered");
                None
            }
        }
    }

    /// Load the template from `path` and render. `None` if it cannot be read.
    pub fn render_file(&self, record: &OrderRecord, path: &Path) -> Option<Vec<u8>> {
        match Template::open(path) {
            Ok(template) => self.render(record, &template),
            Err(e) => {
                tracing::warn!(error = %e, "no declaration rendered");
                None
            }
        }
    }

    pub fn try_render(&self, record: &OrderRecord, template: &Template) -> Result<Vec<u8>, DeclaraError> {
        let canvas = self.draw(record);
        tracing::debug!(
            strings = canvas.text_runs().len(),
            lines = canvas.lines().len(),
            "overlay drawn"
        );
        merge::stamp_first_page(&template.bytes, &canvas)
    }

    /// Draw the overlay without merging it.
    pub fn draw(&self, record: &OrderRecord) -> Canvas {
        let c = &self.layout;
        let mut canvas = Canvas::new(Font::Helvetica, BODY_FONT_SIZE);

        self.draw_party(&mut canvas, &record.sender, &self.sender_block());
        if !record.recipient.name.is_empty() {
            self.draw_party(&mut canvas, &record.recipient, &self.recipient_block());
        }

        if record.items.len() > ITEMS_PER_COLUMN {
            canvas.set_line_width(SEPARATOR_WIDTH);
            let block_height = ITEMS_PER_COLUMN as f32 * c.items_row_height;
            let top = c.items_top_y + 10.0;
            let bottom = c.items_top_y - block_height + 5.0;
            canvas.line(c.separator_description_x, top, c.separator_description_x, bottom);
            canvas.line(c.separator_quantity_x, top, c.separator_quantity_x, bottom);
        }

        canvas.set_font(Font::Helvetica, ITEM_FONT_SIZE);
        for (i, item) in record.items.iter().take(MAX_ITEMS).enumerate() {
            let row = (i % ITEMS_PER_COLUMN) as f32;
            let y = c.items_top_y - row * c.items_row_height;
            let (name_x, quantity_x, max_chars) = if i < ITEMS_PER_COLUMN {
                (c.item_description_x, c.item_quantity_x, COLUMN_1_NAME_MAX_CHARS)
            } else {
                (c.item_description_x_2, c.item_quantity_x_2, COLUMN_2_NAME_MAX_CHARS)
            };
            canvas.draw_string(name_x, y, &truncate_chars(&item.name, max_chars));
            canvas.draw_string(quantity_x, y, &item.quantity);
        }

        canvas.set_font(Font::HelveticaBold, BODY_FONT_SIZE);
        canvas.draw_string(c.weight_x, c.weight_y, &record.weight);

        let date = &record.declaration_date;
        canvas.set_font(Font::Helvetica, BODY_FONT_SIZE);
        canvas.draw_string(c.date_city_x, c.date_y, DECLARATION_CITY);
        canvas.draw_string(c.date_day_x, c.date_y, &date.day.to_string());
        canvas.draw_string(c.date_month_x, c.date_y, &date.month_name);
        canvas.draw_string(c.date_year_x, c.date_y, &date.year.to_string());

        canvas
    }

    fn draw_party(&self, canvas: &mut Canvas, party: &Party, block: &PartyBlock) {
        canvas.draw_string(block.name.0, block.name.1, &truncate_chars(&party.name, NAME_MAX_CHARS));

        match self.address_style {
            AddressStyle::Wrap => draw_wrapped(canvas, &party.address, block),
            AddressStyle::Truncate => canvas.draw_string(
                block.address.0,
                block.address.1,
                &truncate_chars(&party.address, ADDRESS_MAX_CHARS),
            ),
        }

        canvas.draw_string(block.city.0, block.city.1, &party.city);
        canvas.draw_string(block.state.0, block.state.1, party.state_code());
        canvas.draw_string(block.postal_code.0, block.postal_code.1, &party.postal_code);
    }

    fn sender_block(&self) -> PartyBlock {
        let c = &self.layout;
        PartyBlock {
            name: (c.sender_name_x, c.sender_name_y),
            address: (c.sender_address_x, c.sender_address_y),
            address_limit_x: c.sender_address_limit_x,
            address_return: (c.sender_address_return_x, c.sender_address_return_y),
            city: (c.sender_city_x, c.sender_city_y),
            state: (c.sender_state_x, c.sender_state_y),
            postal_code: (c.sender_postal_code_x, c.sender_postal_code_y),
        }
    }

    fn recipient_block(&self) -> PartyBlock {
        let c = &self.layout;
        PartyBlock {
            name: (c.recipient_name_x, c.recipient_name_y),
            address: (c.recipient_address_x, c.recipient_address_y),
            address_limit_x: c.recipient_address_limit_x,
            address_return: (c.recipient_address_return_x, c.recipient_address_return_y),
            city: (c.recipient_city_x, c.recipient_city_y),
            state: (c.recipient_state_x, c.recipient_state_y),
            postal_code: (c.recipient_postal_code_x, c.recipient_postal_code_y),
        }
    }
}

/// Coordinates of one party's fields.
struct PartyBlock {
    name: (f32, f32),
    address: (f32, f32),
    address_limit_x: f32,
    address_return: (f32, f32),
    city: (f32, f32),
    state: (f32, f32),
    postal_code: (f32, f32),
}

fn draw_wrapped(canvas: &mut Canvas, address: &str, block: &PartyBlock) {
    let available = block.address_limit_x - block.address.0;
    match wrap_two_lines(address, available, canvas.font_size()) {
        (first, None) => canvas.draw_string(block.address.0, block.address.1, &first),
        (first, Some(second)) => {
            canvas.draw_string(block.address.0, block.address.1, &first);
            canvas.draw_string(block.address_return.0, block.address_return.1, &second);
        }
    }
}

/// Split `text` into a first line narrower than `available` points
/// (Helvetica at `size`) and, if it overflows, a second line with every
/// remaining word.
pub fn wrap_two_lines(text: &str, available: f32, size: f32) -> (String, Option<String>) {
    if helvetica_width(text, size) <= available {
        return (text.to_string(), None);
    }

    let words: Vec<&str> = text.split(' ').collect();
    let mut first = String::new();
    let mut second = String::new();

    for (i, word) in words.iter().enumerate() {
        let candidate = if first.is_empty() {
            (*word).to_string()
        } else {
            format!("{first} {word}")
        };
        if helvetica_width(&candidate, size) < available {
            first = candidate;
        } else {
            second = words[i..].join(" ");
            if second.is_empty() {
                second = (*word).to_string();
            }
            break;
        }
    }

    (first, Some(second))
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
