//! Rotating loading phrases with fade in and out.

use super::ease::{fhash, lerp};

pub const PHRASE_MIN_SECS: f32 = 2.0;
pub const PHRASE_MAX_SECS: f32 = 5.0;
pub const PHRASE_FADE_SECS: f32 = 0.35;

pub const PHRASES: &[&str] = &[
    "Se der ruim, a culpa e do gato no teclado",
    "Instalando shaders quanticos (mentira... ou nao?)",
    "O futuro chegou; so falta carregar",
    "Seu PC esta 63% mais lindo agora",
    "Teleportando assets inexistentes... uau!",
    "Fazendo carinho na GPU",
    "Preparando o modo foco: shhh",
    "Renderizando aquele 'uhul'",
    "Quase la... tipo, quase quase",
    "Respira... inspira... anima!",
    "Pausa dramatica para suspense",
    "Se for bug, vira feature com glow",
    "Colando glitter no algoritmo",
    "Aquecendo o laranja Itaú no modo neon",
    "StackSpot AI abrindo a mente e fechando bugs",
    "Cafezinho coado em JIT, produtividade em ascensao",
    "Sincronizando contextos e desincronizando o sono",
    "Compilando ideias, linkando coragem",
    "BRB: alinhando deploy com a Lua nova",
    "Carregando plugins do Qt sem drama hoje",
    "Bendita seja a pipeline que passa de primeira",
    "Preparando a retrô com pão de queijo estrategico",
    "Fazendo carinho no Kafka para as mensagens fluirem",
    "Coletando logs e devolvendo paz",
    "Chamando o SRE espiritual para benzer o deploy",
    "StackSpot AI carregando memórias do projeto",
    "Destravando PRs com diplomacia e cafe",
    "Agro e tech: adubando commits",
    "Custodia de bugs sob guarda reforcada",
    "Criptografando desculpas para a retro",
    "Detectando feature que nasceu bug mas tem futuro",
    "Renderizando aquele brilho no olho corporativo",
    "Alocando energia extra para a hora extra",
    "Refatorando a segunda-feira em coisa boa",
    "Desfragmentando backlog e juntando coragem",
    "Varrendo a fila do SQS com vassoura mágica",
    "Carregando dashboards para provar que funciona",
    "Fazendo pair programming com o destino",
    "Preparando rollback so por supersticao",
    "Blindando tokens contra azar de sexta-feira",
    "Redimensionando ambicao para caber no sprint",
    "Evangelizando o linter com bons modos",
    "Cacheando cafe para uso intensivo",
    "Chamando a deidade dos drivers de video",
    "Orquestrando threads para dancar em harmonia",
    "Elevando o cold start ao estado zen",
    "Semeando testes e colhendo confianca",
    "Polindo bordas ate refletirem boas praticas",
    "Gerando instalador que TI corporativa chama de lindo",
    "Pedindo benção ao compliance e seguindo viagem",
    "Somando cafe com foco e dividindo ansiedade",
    "Negociando prazo com o destino: aprovado",
    "Guardando segredos no .env e no coracao",
    "Roteando notificacoes direto para a alegria",
    "Fazendo merge sem deixar marcas",
    "Pre-aquecendo o cérebro para o code review",
    "Debugando pensamento ate virar plano",
    "Prendendo o caos no try/catch",
    "Verificando certificados e energias",
    "Dando foco ao foco com foco",
    "Curvando o tempo para caber mais uma tarefa",
    "Promovendo a paz mundial entre threads",
    "Convencendo a GPU a participar da festa",
    "Chamando o modo ninja: silencioso e eficiente",
    "Lapidando telemetria para so brilhar o que importa",
    "Guardando um rollback debaixo do travesseiro",
    "Ensinando o app a gostar de segunda",
    "Fechando o escopo e abrindo um sorriso",
    "Atualizando drivers de esperança",
    "Transformando overtime em overtudo",
    "Elevando a UX ao estado de arte silenciosa",
];

#[derive(Debug, Clone)]
pub struct PhraseRotator {
    phrases: Vec<String>,
    index: usize,
    alpha: f32,
    timer: f32,
    interval: f32,
    fading_out: bool,
}

impl PhraseRotator {
    /// `seed` picks the first phrase.
    pub fn new(phrases: Vec<String>, seed: f32) -> Self {
        let index = if phrases.is_empty() {
            0
        } else {
            ((fhash(123.456 + seed) * phrases.len() as f32) as usize) % phrases.len()
        };
        Self {
            phrases,
            index,
            alpha: 1.0,
            timer: 0.0,
            interval: 4.0,
            fading_out: false,
        }
    }

    pub fn with_defaults(seed: f32) -> Self {
        Self::new(PHRASES.iter().map(|s| s.to_string()).collect(), seed)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.phrases.get(self.index).map(String::as_str)
    }

    /// Raw opacity in `[0, 1]`; apply easing when painting.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Start fading the current phrase out right away.
    pub fn skip(&mut self) {
        self.fading_out = true;
    }

    /// `t` is the global animation clock, used to vary the next interval.
    pub fn update(&mut self, dt: f32, t: f32) {
        if self.phrases.is_empty() {
            return;
        }
        self.timer += dt;
        if !self.fading_out {
            self.alpha = (self.alpha + dt / PHRASE_FADE_SECS).min(1.0);
            if self.timer >= self.interval {
                self.fading_out = true;
            }
        } else {
            self.alpha = (self.alpha - dt / PHRASE_FADE_SECS).max(0.0);
            if self.alpha <= 0.0 {
                self.next(t);
            }
        }
    }

    fn next(&mut self, t: f32) {
        self.index = (self.index + 1) % self.phrases.len();
        self.interval = lerp(
            PHRASE_MIN_SECS,
            PHRASE_MAX_SECS,
            fhash(self.index as f32 + t),
        );
        self.timer = 0.0;
        self.fading_out = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotator() -> PhraseRotator {
        PhraseRotator::new(vec!["a".into(), "b".into(), "c".into()], 0.0)
    }

    #[test]
    fn fades_out_then_advances() {
        let mut r = rotator();
        let first = r.index();
        let dt = 1.0 / 60.0;
        let mut t = 0.0;
        // Default interval is 4 s plus the fade
        for _ in 0..(60 * 4) {
            t += dt;
            r.update(dt, t);
        }
        assert_eq!(r.index(), first);
        for _ in 0..30 {
            t += dt;
            r.update(dt, t);
        }
        assert_eq!(r.index(), (first + 1) % 3);
        assert!(r.alpha() < 0.5);
        assert!((PHRASE_MIN_SECS..=PHRASE_MAX_SECS).contains(&r.interval()));
    }

    #[test]
    fn skip_starts_the_fade_immediately() {
        let mut r = rotator();
        let first = r.index();
        r.skip();
        r.update(0.2, 0.2);
        assert!(r.alpha() < 1.0);
        r.update(0.2, 0.4);
        assert_eq!(r.index(), (first + 1) % 3);
    }

    #[test]
    fn alpha_stays_in_range() {
        let mut r = PhraseRotator::with_defaults(42.0);
        let mut t = 0.0;
        for _ in 0..5000 {
            t += 0.016;
            r.update(0.016, t);
            assert!((0.0..=1.0).contains(&r.alpha()));
            assert!(r.index() < PHRASES.len());
        }
    }

    #[test]
    fn empty_list_is_inert() {
        let mut r = PhraseRotator::new(Vec::new(), 1.0);
        r.update(10.0, 10.0);
        assert_eq!(r.current(), None);
    }
}
