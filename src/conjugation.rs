//! Conjugation engine.
//!
//! Regular simple tenses are stem + ending (or infinitive + ending for futuro
//! and condicional). Imperfecto de subjuntivo is derived from the pretérito
//! "ellos" form, so it stays correct for verbs with an irregular preterite.
//! Compound tenses are haber + participle. A `VerbEntry` may replace any
//! tense wholesale through `forms`.

use crate::domain::{Pronoun, Tense, VerbClass, VerbEntry};

type Endings = [&'static str; 6];

const AR_PRESENTE: Endings = ["o", "as", "a", "amos", "áis", "an"];
const ER_PRESENTE: Endings = ["o", "es", "e", "emos", "éis", "en"];
const IR_PRESENTE: Endings = ["o", "es", "e", "imos", "ís", "en"];

const AR_PRETERITO: Endings = ["é", "aste", "ó", "amos", "asteis", "aron"];
const ER_IR_PRETERITO: Endings = ["í", "iste", "ió", "imos", "isteis", "ieron"];

const AR_IMPERFECTO: Endings = ["aba", "abas", "aba", "ábamos", "abais", "aban"];
const ER_IR_IMPERFECTO: Endings = ["ía", "ías", "ía", "íamos", "íais", "ían"];

const FUTURO: Endings = ["é", "ás", "á", "emos", "éis", "án"];
const CONDICIONAL: Endings = ["ía", "ías", "ía", "íamos", "íais", "ían"];

const AR_SUBJUNTIVO: Endings = ["e", "es", "e", "emos", "éis", "en"];
const ER_IR_SUBJUNTIVO: Endings = ["a", "as", "a", "amos", "áis", "an"];

const AR_IMPERFECTO_SUBJ: Endings = ["ara", "aras", "ara", "áramos", "arais", "aran"];
const ER_IR_IMPERFECTO_SUBJ: Endings = ["iera", "ieras", "iera", "iéramos", "ierais", "ieran"];

const HABER_PRESENTE: Endings = ["he", "has", "ha", "hemos", "habéis", "han"];
const HABER_IMPERFECTO: Endings = ["había", "habías", "había", "habíamos", "habíais", "habían"];
const HABER_FUTURO: Endings = ["habré", "habrás", "habrá", "habremos", "habréis", "habrán"];

/// Regular ending for a verb class, as taught to learners.
/// Compound tenses have no single ending and return `None`.
pub fn regular_ending(class: VerbClass, tense: Tense, pronoun: Pronoun) -> Option<&'static str> {
  let table = match (tense, class) {
    (Tense::Presente, VerbClass::Ar) => &AR_PRESENTE,
    (Tense::Presente, VerbClass::Er) => &ER_PRESENTE,
    (Tense::Presente, VerbClass::Ir) => &IR_PRESENTE,
    (Tense::Preterito, VerbClass::Ar) => &AR_PRETERITO,
    (Tense::Preterito, _) => &ER_IR_PRETERITO,
    (Tense::Imperfecto, VerbClass::Ar) => &AR_IMPERFECTO,
    (Tense::Imperfecto, _) => &ER_IR_IMPERFECTO,
    (Tense::Futuro, _) => &FUTURO,
    (Tense::Condicional, _) => &CONDICIONAL,
    (Tense::PresenteSubjuntivo, VerbClass::Ar) => &AR_SUBJUNTIVO,
    (Tense::PresenteSubjuntivo, _) => &ER_IR_SUBJUNTIVO,
    (Tense::ImperfectoSubjuntivo, VerbClass::Ar) => &AR_IMPERFECTO_SUBJ,
    (Tense::ImperfectoSubjuntivo, _) => &ER_IR_IMPERFECTO_SUBJ,
    _ => return None,
  };
  Some(table[pronoun.index()])
}

/// Infinitive minus its two-letter ending.
pub fn stem(infinitive: &str) -> &str {
  match infinitive.char_indices().rev().nth(1) {
    Some((idx, _)) => &infinitive[..idx],
    None => "",
  }
}

pub fn participle(verb: &VerbEntry) -> Option<String> {
  if let Some(p) = &verb.participle {
    return Some(p.clone());
  }
  let suffix = match VerbClass::of(&verb.infinitive)? {
    VerbClass::Ar => "ado",
    VerbClass::Er | VerbClass::Ir => "ido",
  };
  Some(format!("{}{}", stem(&verb.infinitive), suffix))
}

/// All six forms of `tense`, or `None` when the infinitive has no
/// recognizable ending and the tense is not supplied explicitly.
pub fn conjugate_tense(verb: &VerbEntry, tense: Tense) -> Option<[String; 6]> {
  if let Some(forms) = verb.forms.get(&tense) {
    return Some(forms.clone());
  }

  match tense {
    Tense::Futuro | Tense::Condicional => {
      let base = verb.future_stem.clone().unwrap_or_else(|| future_base(&verb.infinitive));
      let endings = if tense == Tense::Futuro { FUTURO } else { CONDICIONAL };
      Some(endings.map(|e| format!("{base}{e}")))
    }
    Tense::ImperfectoSubjuntivo => {
      let preterito = conjugate_tense(verb, Tense::Preterito)?;
      imperfect_subjunctive_from(&preterito[Pronoun::Ellos.index()])
    }
    Tense::Perfecto | Tense::Pluscuamperfecto | Tense::FuturoPerfecto => {
      let p = participle(verb)?;
      let aux = match tense {
        Tense::Perfecto => HABER_PRESENTE,
        Tense::Pluscuamperfecto => HABER_IMPERFECTO,
        _ => HABER_FUTURO,
      };
      Some(aux.map(|a| format!("{a} {p}")))
    }
    _ => {
      let class = VerbClass::of(&verb.infinitive)?;
      let s = stem(&verb.infinitive);
      let mut out: [String; 6] = Default::default();
      for p in Pronoun::ALL {
        out[p.index()] = format!("{}{}", s, regular_ending(class, tense, p)?);
      }
      Some(out)
    }
  }
}

pub fn conjugate(verb: &VerbEntry, tense: Tense, pronoun: Pronoun) -> Option<String> {
  conjugate_tense(verb, tense).map(|forms| forms[pronoun.index()].clone())
}

/// Every form of every tense, in tense order.
pub fn all_forms(verb: &VerbEntry) -> Vec<String> {
  Tense::ALL
    .iter()
    .filter_map(|t| conjugate_tense(verb, *t))
    .flat_map(|forms| forms.into_iter())
    .collect()
}

// "oír" keeps its accent in the infinitive but not in the future: oiré.
fn future_base(infinitive: &str) -> String {
  infinitive.replace("ír", "ir")
}

fn imperfect_subjunctive_from(ellos_preterito: &str) -> Option<[String; 6]> {
  let base = ellos_preterito.strip_suffix("ron")?;
  let accented = accent_last_vowel(base);
  Some([
    format!("{base}ra"),
    format!("{base}ras"),
    format!("{base}ra"),
    format!("{accented}ramos"),
    format!("{base}rais"),
    format!("{base}ran"),
  ])
}

fn accent_last_vowel(base: &str) -> String {
  let mut chars: Vec<char> = base.chars().collect();
  if let Some(last) = chars.last_mut() {
    *last = match *last {
      'a' => 'á',
      'e' => 'é',
      other => other,
    };
  }
  chars.into_iter().collect()
}
