use serde::{Deserialize, Serialize};
use std::fmt;

/// Brazilian federative unit (two-letter region code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Uf {
    AC,
    AL,
    AP,
    AM,
    BA,
    CE,
    DF,
    ES,
    GO,
    MA,
    MT,
    MS,
    MG,
    PA,
    PB,
    PR,
    PE,
    PI,
    RJ,
    RN,
    RS,
    RO,
    RR,
    SC,
    SP,
    SE,
    TO,
}

impl Uf {
    /// All codes, in the order the city/state splitter scans them.
    pub const ALL: [Uf; 27] = [
        Uf::AC,
        Uf::AL,
        Uf::AP,
        Uf::AM,
        Uf::BA,
        Uf::CE,
        Uf::DF,
        Uf::ES,
        Uf::GO,
        Uf::MA,
        Uf::MT,
        Uf::MS,
        Uf::MG,
        Uf::PA,
        Uf::PB,
        Uf::PR,
        Uf::PE,
        Uf::PI,
        Uf::RJ,
        Uf::RN,
        Uf::RS,
        Uf::RO,
        Uf::RR,
        Uf::SC,
        Uf::SP,
        Uf::SE,
        Uf::TO,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Uf::AC => "AC",
            Uf::AL => "AL",
            Uf::AP => "AP",
            Uf::AM => "AM",
            Uf::BA => "BA",
            Uf::CE => "CE",
            Uf::DF => "DF",
            Uf::ES => "ES",
            Uf::GO => "GO",
            Uf::MA => "MA",
            Uf::MT => "MT",
            Uf::MS => "MS",
            Uf::MG => "MG",
            Uf::PA => "PA",
            Uf::PB => "PB",
            Uf::PR => "PR",
            Uf::PE => "PE",
            Uf::PI => "PI",
            Uf::RJ => "RJ",
            Uf::RN => "RN",
            Uf::RS => "RS",
            Uf::RO => "RO",
            Uf::RR => "RR",
            Uf::SC => "SC",
            Uf::SP => "SP",
            Uf::SE => "SE",
            Uf::TO => "TO",
        }
    }
}

impl fmt::Display for Uf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of the shipment (sender or recipient).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: Option<Uf>,
    pub postal_code: String,
}

impl Party {
    /// State code for display, empty when unknown.
    pub fn state_code(&self) -> &'static str {
        self.state.map(Uf::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationDate {
    pub day: u32,
    pub month_name: String,
    pub year: i32,
}

impl fmt::Display for DeclarationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month_name, self.year)
    }
}

/// Fields scraped from one shipping order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub sender: Party,
    pub recipient: Party,
    pub items: Vec<LineItem>,
    pub weight: String,
    pub order_number: Option<String>,
    pub declaration_date: DeclarationDate,
}
