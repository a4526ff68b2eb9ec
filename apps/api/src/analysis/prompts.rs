// All LLM prompt constants for the analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Founder analysis prompt.
/// Replace: {punto_de_partida}, {personalidad_fundador}, {pasiones_fundador},
///          {recursos_fundador}, {estilo_vida_deseado}, {json_instruction}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Actúa como un consultor de negocios y estratega de startups de élite. Tu cliente es un emprendedor con el siguiente perfil:
- Punto de Partida (Idea o Intención): {punto_de_partida}
- Personalidad (Myers-Briggs): {personalidad_fundador}
- Pasiones y Hobbies: {pasiones_fundador}
- Recursos y Habilidades Actuales: {recursos_fundador}
- Estilo de Vida Deseado: {estilo_vida_deseado}

TU TAREA PRINCIPAL:
Genera 5 ideas de negocio específicas, innovadoras y viables que se alineen perfectamente con el perfil completo del emprendedor. Si el emprendedor ya proporcionó una idea, úsala como inspiración para la primera idea y luego genera 4 alternativas superiores o complementarias. Y debes analizarlas respecto al mercado, para saber si es una idea que se emprenderá en un océano azul o rojo.

PARA CADA UNA DE LAS 5 IDEAS, DEBES PROPORCIONAR:
1. "nombre": Un nombre atractivo para la idea de negocio.
2. "descripcion": Una descripción concisa y potente (2-3 frases).
3. "viabilidad_mercado": Un análisis orientativo del mercado. Indica si es un océano azul o rojo, el potencial de ingresos (bajo, medio, alto) y si es compatible con el estilo de vida deseado.
4. "viabilidad_personal": Un análisis de la sinergia con el emprendedor. Evalúa cómo la idea se alinea con su personalidad, pasiones y habilidades. Identifica una habilidad clave (blanda o técnica, no financiera) que necesitaría desarrollar.
5. "calificacion": Una calificación numérica de 1 a 5 (donde 5 es máxima viabilidad).
6. "razon_calificacion": Una justificación breve y clara de por qué le diste esa calificación.

FORMATO DE RESPUESTA OBLIGATORIO:
Responde EXCLUSIVAMENTE con un objeto JSON válido que contenga una única clave "ideas", cuyo valor sea un array de los 5 objetos de idea. {json_instruction}"#;
