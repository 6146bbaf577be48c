//! Weekly radio grid entries.

use std::{convert::Infallible, fmt, str::FromStr};

use indexmap::IndexSet;
use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Ordered set of weekday tokens a program airs on.
///
/// Tokens are free text (the grid uses labels such as `SEGUNDA` or
/// `SÁBADO/ DIAS EXCLUSIVOS`). On the wire and in storage the set is the
/// comma-joined token list.
#[derive(Debug, Clone, Default, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub struct Weekdays(IndexSet<String>);

impl Weekdays {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token.trim())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Weekdays {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .map(|token| token.trim().to_owned())
                .filter(|token| !token.is_empty())
                .collect(),
        )
    }
}

impl FromStr for Weekdays {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(value.split(',').collect())
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// A stored program slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub id: i64,
    /// Airing time as free text; the grid contains placeholders like `?h`.
    pub time: String,
    pub name: String,
    pub weekdays: Weekdays,
    /// Recurrence tag (`MENSAL`, `SEMANAL`, ...); empty when weekly by default.
    pub category: String,
}

/// Fields of a program slot to insert or overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntryInput {
    pub time: String,
    pub name: String,
    pub weekdays: Weekdays,
    pub category: String,
}

impl ScheduleEntryInput {
    fn slot(time: &str, name: &str, weekdays: &str, category: &str) -> Self {
        Self {
            time: time.into(),
            name: name.into(),
            weekdays: weekdays.split(',').collect(),
            category: category.into(),
        }
    }
}

const EXCLUSIVE_DAYS: &str = "SÁBADO/ DIAS EXCLUSIVOS";

/// The station's current weekly grid, loaded by the `schedule-seed` binary.
pub fn station_grid() -> Vec<ScheduleEntryInput> {
    [
        ("11h", "Momento Esporte - Irecê", "SEGUNDA", ""),
        ("11h", "Barriguda Notícias", "SEGUNDA", ""),
        ("19h", "De cara com Moisés Cambuy", "SEGUNDA", ""),
        ("20h", "Vozes Regionais", "SEGUNDA", ""),
        ("11h", "Barriguda Notícias", "TERÇA", ""),
        ("14h", "A leitura nossa de cada dia", "TERÇA", ""),
        ("15h", "Salve Maria", "TERÇA", ""),
        ("08h", "Capoeira em Foco", "QUARTA", ""),
        ("11h", "Barriguda Notícias", "QUARTA", ""),
        ("08h", "Sessão da Câmara", "QUINTA", ""),
        ("11h", "Barriguda Notícias", "QUINTA", ""),
        ("16h", "A voz da caatinga", "QUINTA", ""),
        ("17h", "Poder da Oração", "QUINTA", ""),
        ("09h", "Helicóptero Musical", "SEXTA", ""),
        ("10h", "Humor, Cordel e Paródia", "SEXTA", ""),
        ("11h", "Barriguda Notícias", "SEXTA", ""),
        ("13h", "Ao som do berimbau", "SEXTA", ""),
        ("14h", "Papo Contemporaneo", "SEXTA", ""),
        ("15h", "PodTeen", "SEXTA", ""),
        ("10h", "Re-Conexão Mental", EXCLUSIVE_DAYS, ""),
        ("19h30m", "Barriguda Games", EXCLUSIVE_DAYS, ""),
        ("10h", "Alimentação Escolar", "QUINTA", "MENSAL"),
        ("16h", "A arte de se conectar", "QUINTA", "MENSAL"),
        ("18h", "Mulheres Inspiradoras", "SEXTA", "MENSAL"),
        ("?h", "Conexão Sustentável", EXCLUSIVE_DAYS, "MENSAL"),
        ("?h", "Poder e Saber", EXCLUSIVE_DAYS, "MENSAL"),
        ("?h", "Visão Espírita", EXCLUSIVE_DAYS, "MENSAL"),
        ("?h", "Euclebia Pereira", EXCLUSIVE_DAYS, "MENSAL"),
        ("?h", "Vã Filosófia", EXCLUSIVE_DAYS, "MENSAL"),
        ("16h", "CME Acontece", "QUINTA", "TRIMESTRAL"),
        ("15h", "Gaiola Vazia", "QUARTA", "QUIZENAL"),
        ("?h", "Direito de Saber", "QUINTA", "QUIZENAL"),
        ("?h", "Ivan Mendes", EXCLUSIVE_DAYS, "SEMANAL"),
        ("?h", "Vozes do Quilombro", EXCLUSIVE_DAYS, "SEMANAL"),
        ("?h", "Gabriela Explica!", EXCLUSIVE_DAYS, "SEMANAL"),
    ]
    .into_iter()
    .map(|(time, name, weekdays, category)| {
        ScheduleEntryInput::slot(time, name, weekdays, category)
    })
    .collect()
}
