use ratatui::style::{Color, Modifier, Style};
use versus_core::{ColorScheme, TokenClass};

/// Terminal colors for one color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
    keyword: Color,
    literal: Color,
    function: Color,
    string: Color,
    number: Color,
    comment: Color,
}

impl Palette {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self {
                background: Color::Rgb(0x28, 0x2c, 0x34),
                foreground: Color::Rgb(0xab, 0xb2, 0xbf),
                accent: Color::Rgb(0x61, 0xaf, 0xef),
                muted: Color::Rgb(0x5c, 0x63, 0x70),
                keyword: Color::Rgb(0xc6, 0x78, 0xdd),
                literal: Color::Rgb(0x56, 0xb6, 0xc2),
                function: Color::Rgb(0x61, 0xaf, 0xef),
                string: Color::Rgb(0x98, 0xc3, 0x79),
                number: Color::Rgb(0xd1, 0x9a, 0x66),
                comment: Color::Rgb(0x5c, 0x63, 0x70),
            },
            ColorScheme::Light => Self {
                background: Color::Rgb(0xfa, 0xfa, 0xfa),
                foreground: Color::Rgb(0x38, 0x3a, 0x42),
                accent: Color::Rgb(0x40, 0x78, 0xf2),
                muted: Color::Rgb(0xa0, 0xa1, 0xa7),
                keyword: Color::Rgb(0xa6, 0x26, 0xa4),
                literal: Color::Rgb(0x01, 0x84, 0xbb),
                function: Color::Rgb(0x40, 0x78, 0xf2),
                string: Color::Rgb(0x50, 0xa1, 0x4f),
                number: Color::Rgb(0x98, 0x68, 0x01),
                comment: Color::Rgb(0xa0, 0xa1, 0xa7),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn token(&self, class: TokenClass) -> Style {
        let style = self.base();
        match class {
            TokenClass::Plain | TokenClass::Punctuation => style,
            TokenClass::Keyword => style.fg(self.keyword),
            TokenClass::Literal => style.fg(self.literal),
            TokenClass::Function => style.fg(self.function),
            TokenClass::String => style.fg(self.string),
            TokenClass::Number => style.fg(self.number),
            TokenClass::Comment => style.fg(self.comment).add_modifier(Modifier::ITALIC),
        }
    }

    pub fn placeholder(&self) -> Style {
        self.base().fg(self.muted).add_modifier(Modifier::ITALIC)
    }

    pub fn heading(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}
