//! Hint texts returned with wrong answers.

use crate::conjugation::{regular_ending, stem};
use crate::domain::{Pronoun, QuestionKind, Tense, VerbClass, VerbEntry, VerbKind};
use crate::util::fill_template;

const REGULAR_STEM_TEMPLATE: &str =
  "💡 Hint: For regular {class} verbs in {tense}, use stem '{stem}' + '-{ending}'";
const REGULAR_INFINITIVE_TEMPLATE: &str =
  "💡 Hint: For regular {class} verbs in {tense}, add '-{ending}' to the infinitive: {verb} + -{ending}";

pub fn irregular_note(infinitive: &str) -> Option<&'static str> {
  let note = match infinitive {
    "ser" => "\"Ser\" is highly irregular. Memorize its forms: soy, eres, es, somos...",
    "estar" => "\"Estar\" has irregular forms in pretérito: estuve, estuviste, estuvo...",
    "ir" => "\"Ir\" shares pretérito forms with \"ser\": fui, fuiste, fue...",
    "tener" => "\"Tener\" has stem change to teng- in yo form presente, and tuv- in pretérito",
    "hacer" => "\"Hacer\" becomes hic- in pretérito (except él/ella: hizo)",
    "poder" => "\"Poder\" is o→ue stem-changing and has irregular pretérito: pude, pudiste...",
    "poner" => "\"Poner\" becomes pong- in yo presente, and pus- in pretérito",
    "decir" => "\"Decir\" has many irregularities: digo in presente, dije in pretérito",
    "venir" => "\"Venir\" becomes veng- in yo presente, vin- in pretérito, vendr- in futuro",
    "salir" => "\"Salir\" becomes salg- in yo presente, and saldr- in futuro",
    "ver" => "\"Ver\" has irregular participle \"visto\" and imperfecto: veía, veías...",
    "dar" => "\"Dar\" is irregular in pretérito: di, diste, dio (no accent marks)",
    "saber" => "\"Saber\" becomes sé in yo presente, and sup- in pretérito",
    "querer" => "\"Querer\" is e→ie stem-changing and has irregular pretérito: quise, quisiste...",
    "pensar" => "\"Pensar\" is e→ie stem-changing in presente: pienso, piensas...",
    "dormir" => "\"Dormir\" is o→ue stem-changing and also changes in pretérito: durmió, durmieron",
    "escribir" => "\"Escribir\" conjugates regularly but has irregular participle: escrito",
    "leer" => "\"Leer\" has spelling changes i→y in pretérito: leyó, leyeron",
    "abrir" => "\"Abrir\" conjugates regularly but has irregular participle: abierto",
    "volver" => "\"Volver\" is o→ue stem-changing and has irregular participle: vuelto",
    _ => return None,
  };
  Some(note)
}

pub fn pronoun_tip(pronoun: Pronoun) -> &'static str {
  match pronoun {
    Pronoun::Yo => "Look for -o in presente, -é/-í in pretérito, -aba/-ía in imperfecto",
    Pronoun::Tu => "Look for -s ending: -as/-es in presente, -aste/-iste in pretérito",
    Pronoun::El => "Look for -a/-e in presente, -ó/-ió in pretérito (with accent!)",
    Pronoun::Nosotros => "Look for -mos ending in all tenses",
    Pronoun::Vosotros => "Look for -áis/-éis/-ís in presente, -ais/-eis in imperfecto",
    Pronoun::Ellos => "Look for -n ending: -an/-en in presente, -aron/-ieron in pretérito",
  }
}

pub fn tense_tip(tense: Tense) -> &'static str {
  match tense {
    Tense::Presente => "Present tense: Simple forms like hablo, comes, vive",
    Tense::Preterito => "Preterite: Look for accents on final syllable (habló, comí) or -aste/-iste endings",
    Tense::Imperfecto => "Imperfect: Look for -aba (for -ar) or -ía (for -er/-ir) patterns",
    Tense::Futuro => "Future: Full infinitive + endings with accents (hablaré, comeré)",
    Tense::Condicional => "Conditional: Full infinitive + -ía endings (hablaría, comería)",
    Tense::Perfecto => "Present perfect: Uses \"he/has/ha/hemos/habéis/han\" + past participle",
    Tense::Pluscuamperfecto => "Pluperfect: Uses \"había/habías/habíamos...\" + past participle",
    Tense::FuturoPerfecto => "Future perfect: Uses \"habré/habrás/habrá/habremos/habréis/habrán\" + past participle",
    Tense::PresenteSubjuntivo => "Present Subjunctive: Opposite vowel (-ar→-e, -er/-ir→-a). Common after \"que\"",
    Tense::ImperfectoSubjuntivo => "Imperfect Subjunctive: -ara/-iera endings (hablara, comiera). Often in \"if\" clauses",
  }
}

fn infinitive_family_tip(class: VerbClass) -> &'static str {
  match class {
    VerbClass::Ar => "💡 This is an -ar verb. Think about common -ar verbs like hablar, llamar, or estar.",
    VerbClass::Er => "💡 This is an -er verb. Think about common -er verbs like comer, tener, or hacer.",
    VerbClass::Ir => "💡 This is an -ir verb. Think about common -ir verbs like vivir, ir, or venir.",
  }
}

/// Stem + ending explanation for a regular verb in a simple tense.
pub fn regular_hint(verb: &str, tense: Tense, pronoun: Pronoun) -> Option<String> {
  if tense.is_compound() {
    return None;
  }
  let class = VerbClass::of(verb)?;
  let ending = regular_ending(class, tense, pronoun)?;
  let tpl = if matches!(tense, Tense::Futuro | Tense::Condicional) {
    REGULAR_INFINITIVE_TEMPLATE
  } else {
    REGULAR_STEM_TEMPLATE
  };
  Some(fill_template(
    tpl,
    &[
      ("class", class.label()),
      ("tense", tense.display_name()),
      ("stem", stem(verb)),
      ("ending", ending),
      ("verb", verb),
    ],
  ))
}

/// Hint for a wrong answer. `verb` is the bank entry when the verb is known.
pub fn hint_for(
  kind: QuestionKind,
  verb_name: &str,
  verb: Option<&VerbEntry>,
  tense: Option<Tense>,
  pronoun: Option<Pronoun>,
) -> Option<String> {
  match kind {
    QuestionKind::Conjugation => {
      let verb = verb?;
      match verb.kind {
        VerbKind::Regular => regular_hint(verb_name, tense?, pronoun?),
        VerbKind::Irregular => irregular_note(verb_name).map(|n| format!("💡 {n}")),
      }
    }
    QuestionKind::IdentifyTense => tense.map(|t| format!("💡 {}", tense_tip(t))),
    QuestionKind::IdentifyPronoun => pronoun.map(|p| format!("💡 {}", pronoun_tip(p))),
    QuestionKind::IdentifyInfinitive => {
      if verb_name.is_empty() {
        return None;
      }
      VerbClass::of(verb_name).map(|c| infinitive_family_tip(c).to_string())
    }
  }
}
