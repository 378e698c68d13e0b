//! Built-in verb bank. Guarantees the game is playable without any config.
//!
//! Regular verbs only need an infinitive and a gloss; irregular verbs list
//! the tenses that break the pattern and let the engine derive the rest.

use crate::domain::{Tense, VerbEntry};

pub fn seed_verbs() -> Vec<VerbEntry> {
  let mut verbs = regular_verbs();
  verbs.extend(irregular_verbs());
  verbs
}

fn regular_verbs() -> Vec<VerbEntry> {
  vec![
    VerbEntry::regular("hablar", "to speak"),
    VerbEntry::regular("comer", "to eat"),
    VerbEntry::regular("vivir", "to live"),
    VerbEntry::regular("trabajar", "to work"),
    VerbEntry::regular("estudiar", "to study"),
    VerbEntry::regular("aprender", "to learn"),
    VerbEntry::regular("beber", "to drink"),
    VerbEntry::regular("correr", "to run"),
    VerbEntry::regular("bailar", "to dance"),
    VerbEntry::regular("cantar", "to sing"),
    VerbEntry::regular("comprender", "to understand"),
    VerbEntry::regular("recibir", "to receive"),
    VerbEntry::regular("vender", "to sell"),
    VerbEntry::regular("caminar", "to walk"),
    VerbEntry::regular("llamar", "to call"),
    VerbEntry::regular("mirar", "to look at"),
    VerbEntry::regular("subir", "to go up"),
  ]
}

fn irregular_verbs() -> Vec<VerbEntry> {
  vec![
    VerbEntry::irregular("ser", "to be (permanent)")
      .with_forms(Tense::Presente, ["soy", "eres", "es", "somos", "sois", "son"])
      .with_forms(Tense::Preterito, ["fui", "fuiste", "fue", "fuimos", "fuisteis", "fueron"])
      .with_forms(Tense::Imperfecto, ["era", "eras", "era", "éramos", "erais", "eran"])
      .with_forms(Tense::PresenteSubjuntivo, ["sea", "seas", "sea", "seamos", "seáis", "sean"]),
    VerbEntry::irregular("estar", "to be (temporary)")
      .with_forms(Tense::Presente, ["estoy", "estás", "está", "estamos", "estáis", "están"])
      .with_forms(Tense::Preterito, ["estuve", "estuviste", "estuvo", "estuvimos", "estuvisteis", "estuvieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["esté", "estés", "esté", "estemos", "estéis", "estén"]),
    VerbEntry::irregular("ir", "to go")
      .with_forms(Tense::Presente, ["voy", "vas", "va", "vamos", "vais", "van"])
      .with_forms(Tense::Preterito, ["fui", "fuiste", "fue", "fuimos", "fuisteis", "fueron"])
      .with_forms(Tense::Imperfecto, ["iba", "ibas", "iba", "íbamos", "ibais", "iban"])
      .with_forms(Tense::PresenteSubjuntivo, ["vaya", "vayas", "vaya", "vayamos", "vayáis", "vayan"]),
    VerbEntry::irregular("tener", "to have")
      .with_future_stem("tendr")
      .with_forms(Tense::Presente, ["tengo", "tienes", "tiene", "tenemos", "tenéis", "tienen"])
      .with_forms(Tense::Preterito, ["tuve", "tuviste", "tuvo", "tuvimos", "tuvisteis", "tuvieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["tenga", "tengas", "tenga", "tengamos", "tengáis", "tengan"]),
    VerbEntry::irregular("hacer", "to do, to make")
      .with_participle("hecho")
      .with_future_stem("har")
      .with_forms(Tense::Presente, ["hago", "haces", "hace", "hacemos", "hacéis", "hacen"])
      .with_forms(Tense::Preterito, ["hice", "hiciste", "hizo", "hicimos", "hicisteis", "hicieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["haga", "hagas", "haga", "hagamos", "hagáis", "hagan"]),
    VerbEntry::irregular("poder", "to be able to")
      .with_future_stem("podr")
      .with_forms(Tense::Presente, ["puedo", "puedes", "puede", "podemos", "podéis", "pueden"])
      .with_forms(Tense::Preterito, ["pude", "pudiste", "pudo", "pudimos", "pudisteis", "pudieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["pueda", "puedas", "pueda", "podamos", "podáis", "puedan"]),
    VerbEntry::irregular("decir", "to say")
      .with_participle("dicho")
      .with_future_stem("dir")
      .with_forms(Tense::Presente, ["digo", "dices", "dice", "decimos", "decís", "dicen"])
      .with_forms(Tense::Preterito, ["dije", "dijiste", "dijo", "dijimos", "dijisteis", "dijeron"])
      .with_forms(Tense::PresenteSubjuntivo, ["diga", "digas", "diga", "digamos", "digáis", "digan"]),
    VerbEntry::irregular("venir", "to come")
      .with_future_stem("vendr")
      .with_forms(Tense::Presente, ["vengo", "vienes", "viene", "venimos", "venís", "vienen"])
      .with_forms(Tense::Preterito, ["vine", "viniste", "vino", "vinimos", "vinisteis", "vinieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["venga", "vengas", "venga", "vengamos", "vengáis", "vengan"]),
    VerbEntry::irregular("querer", "to want")
      .with_future_stem("querr")
      .with_forms(Tense::Presente, ["quiero", "quieres", "quiere", "queremos", "queréis", "quieren"])
      .with_forms(Tense::Preterito, ["quise", "quisiste", "quiso", "quisimos", "quisisteis", "quisieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["quiera", "quieras", "quiera", "queramos", "queráis", "quieran"]),
    VerbEntry::irregular("saber", "to know")
      .with_future_stem("sabr")
      .with_forms(Tense::Presente, ["sé", "sabes", "sabe", "sabemos", "sabéis", "saben"])
      .with_forms(Tense::Preterito, ["supe", "supiste", "supo", "supimos", "supisteis", "supieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["sepa", "sepas", "sepa", "sepamos", "sepáis", "sepan"]),
    VerbEntry::irregular("dar", "to give")
      .with_forms(Tense::Presente, ["doy", "das", "da", "damos", "dais", "dan"])
      .with_forms(Tense::Preterito, ["di", "diste", "dio", "dimos", "disteis", "dieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["dé", "des", "dé", "demos", "deis", "den"]),
    VerbEntry::irregular("ver", "to see")
      .with_participle("visto")
      .with_forms(Tense::Presente, ["veo", "ves", "ve", "vemos", "veis", "ven"])
      .with_forms(Tense::Preterito, ["vi", "viste", "vio", "vimos", "visteis", "vieron"])
      .with_forms(Tense::Imperfecto, ["veía", "veías", "veía", "veíamos", "veíais", "veían"])
      .with_forms(Tense::PresenteSubjuntivo, ["vea", "veas", "vea", "veamos", "veáis", "vean"]),
    VerbEntry::irregular("poner", "to put")
      .with_participle("puesto")
      .with_future_stem("pondr")
      .with_forms(Tense::Presente, ["pongo", "pones", "pone", "ponemos", "ponéis", "ponen"])
      .with_forms(Tense::Preterito, ["puse", "pusiste", "puso", "pusimos", "pusisteis", "pusieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["ponga", "pongas", "ponga", "pongamos", "pongáis", "pongan"]),
    VerbEntry::irregular("salir", "to leave")
      .with_future_stem("saldr")
      .with_forms(Tense::Presente, ["salgo", "sales", "sale", "salimos", "salís", "salen"])
      .with_forms(Tense::PresenteSubjuntivo, ["salga", "salgas", "salga", "salgamos", "salgáis", "salgan"]),
    VerbEntry::irregular("pensar", "to think")
      .with_forms(Tense::Presente, ["pienso", "piensas", "piensa", "pensamos", "pensáis", "piensan"])
      .with_forms(Tense::PresenteSubjuntivo, ["piense", "pienses", "piense", "pensemos", "penséis", "piensen"]),
    VerbEntry::irregular("dormir", "to sleep")
      .with_forms(Tense::Presente, ["duermo", "duermes", "duerme", "dormimos", "dormís", "duermen"])
      .with_forms(Tense::Preterito, ["dormí", "dormiste", "durmió", "dormimos", "dormisteis", "durmieron"])
      .with_forms(Tense::PresenteSubjuntivo, ["duerma", "duermas", "duerma", "durmamos", "durmáis", "duerman"]),
    VerbEntry::irregular("leer", "to read")
      .with_participle("leído")
      .with_forms(Tense::Preterito, ["leí", "leíste", "leyó", "leímos", "leísteis", "leyeron"]),
    VerbEntry::irregular("escribir", "to write").with_participle("escrito"),
    VerbEntry::irregular("abrir", "to open").with_participle("abierto"),
    VerbEntry::irregular("volver", "to return")
      .with_participle("vuelto")
      .with_forms(Tense::Presente, ["vuelvo", "vuelves", "vuelve", "volvemos", "volvéis", "vuelven"])
      .with_forms(Tense::PresenteSubjuntivo, ["vuelva", "vuelvas", "vuelva", "volvamos", "volváis", "vuelvan"]),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::conjugation::conjugate;
  use crate::domain::{Pronoun, VerbKind};
  use std::collections::HashSet;

  #[test]
  fn bank_has_enough_unique_verbs() {
    let verbs = seed_verbs();
    assert!(verbs.len() >= 25);
    let unique: HashSet<_> = verbs.iter().map(|v| v.infinitive.as_str()).collect();
    assert_eq!(unique.len(), verbs.len());
  }

  #[test]
  fn every_verb_conjugates_every_cell() {
    for v in seed_verbs() {
      for t in Tense::ALL {
        for p in Pronoun::ALL {
          let form = conjugate(&v, t, p);
          assert!(
            form.as_deref().is_some_and(|f| !f.is_empty()),
            "{} {:?} {:?} has no form",
            v.infinitive, t, p
          );
        }
      }
    }
  }

  #[test]
  fn irregular_derivations_look_right() {
    let bank = seed_verbs();
    let find = |inf: &str| bank.iter().find(|v| v.infinitive == inf).unwrap().clone();

    assert_eq!(conjugate(&find("tener"), Tense::ImperfectoSubjuntivo, Pronoun::Nosotros).as_deref(), Some("tuviéramos"));
    assert_eq!(conjugate(&find("hacer"), Tense::Perfecto, Pronoun::Yo).as_deref(), Some("he hecho"));
    assert_eq!(conjugate(&find("ir"), Tense::Futuro, Pronoun::Yo).as_deref(), Some("iré"));
    assert_eq!(conjugate(&find("leer"), Tense::ImperfectoSubjuntivo, Pronoun::Ellos).as_deref(), Some("leyeran"));
    assert_eq!(conjugate(&find("salir"), Tense::Preterito, Pronoun::El).as_deref(), Some("salió"));
    assert_eq!(find("ser").kind, VerbKind::Irregular);
    assert_eq!(find("hablar").kind, VerbKind::Regular);
  }
}
