//! Id-addressed edits on a rule configuration
//!
//! These mirror what the options page does: change a field, add or remove a
//! group or rule, and drag groups or rules into a new position. Edits do not
//! re-validate; run [`Migrator::normalize_config`](crate::rules::Migrator::normalize_config)
//! before persisting.

use crate::rules::ids::IdGenerator;
use crate::rules::types::{Configuration, Group, Rule};
use crate::{EditError, EditResult};

impl Configuration {
    fn group_mut(&mut self, group_id: &str) -> EditResult<&mut Group> {
        self.find_group_mut(group_id)
            .ok_or_else(|| EditError::GroupNotFound(group_id.to_string()))
    }

    /// Like `group_mut`, but refuses the default group
    fn custom_group_mut(&mut self, group_id: &str) -> EditResult<&mut Group> {
        let group = self.group_mut(group_id)?;
        if group.is_default {
            return Err(EditError::DefaultGroupLocked(group_id.to_string()));
        }
        Ok(group)
    }

    fn rule_mut(&mut self, group_id: &str, rule_id: &str) -> EditResult<&mut Rule> {
        self.group_mut(group_id)?
            .rules
            .iter_mut()
            .find(|r| r.id == rule_id)
            .ok_or_else(|| EditError::RuleNotFound {
                group_id: group_id.to_string(),
                rule_id: rule_id.to_string(),
            })
    }

    pub fn update_group_prompt(&mut self, group_id: &str, prompt: &str) -> EditResult<()> {
        self.group_mut(group_id)?.prompt = prompt.to_string();
        Ok(())
    }

    /// Sets the group's own selector (only consulted on the default group)
    pub fn update_group_selector(&mut self, group_id: &str, selector: &str) -> EditResult<()> {
        self.group_mut(group_id)?.css_selector = selector.to_string();
        Ok(())
    }

    pub fn update_rule_pattern(
        &mut self,
        group_id: &str,
        rule_id: &str,
        url_pattern: &str,
    ) -> EditResult<()> {
        self.rule_mut(group_id, rule_id)?.url_pattern = url_pattern.to_string();
        Ok(())
    }

    pub fn update_rule_selector(
        &mut self,
        group_id: &str,
        rule_id: &str,
        selector: &str,
    ) -> EditResult<()> {
        self.rule_mut(group_id, rule_id)?.css_selector = selector.to_string();
        Ok(())
    }

    /// Inserts a new group at the front, holding one empty rule
    ///
    /// Returns the new group's id.
    pub fn add_group<G: IdGenerator>(&mut self, prompt: &str, ids: &mut G) -> String {
        let group_id = ids.next_id();
        let rule = Rule::empty(ids.next_id());
        self.groups
            .insert(0, Group::new_custom(group_id.clone(), prompt, vec![rule]));
        group_id
    }

    /// Removes a group; the default group cannot be removed
    pub fn delete_group(&mut self, group_id: &str) -> EditResult<Group> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| EditError::GroupNotFound(group_id.to_string()))?;

        if self.groups[index].is_default {
            return Err(EditError::DefaultGroupLocked(group_id.to_string()));
        }
        Ok(self.groups.remove(index))
    }

    /// Appends an empty rule to a group and returns its id
    pub fn add_rule<G: IdGenerator>(&mut self, group_id: &str, ids: &mut G) -> EditResult<String> {
        let group = self.custom_group_mut(group_id)?;
        let rule_id = ids.next_id();
        group.rules.push(Rule::empty(rule_id.clone()));
        Ok(rule_id)
    }

    pub fn delete_rule(&mut self, group_id: &str, rule_id: &str) -> EditResult<Rule> {
        let group = self.custom_group_mut(group_id)?;
        let index = group
            .rules
            .iter()
            .position(|r| r.id == rule_id)
            .ok_or_else(|| EditError::RuleNotFound {
                group_id: group_id.to_string(),
                rule_id: rule_id.to_string(),
            })?;
        Ok(group.rules.remove(index))
    }

    /// Moves a group to `index` in the stored order
    pub fn move_group(&mut self, group_id: &str, index: usize) -> EditResult<()> {
        let from = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| EditError::GroupNotFound(group_id.to_string()))?;
        move_item(&mut self.groups, from, index)
    }

    /// Moves a rule to `index` within its group
    pub fn move_rule(&mut self, group_id: &str, rule_id: &str, index: usize) -> EditResult<()> {
        let group = self.group_mut(group_id)?;
        let from = group
            .rules
            .iter()
            .position(|r| r.id == rule_id)
            .ok_or_else(|| EditError::RuleNotFound {
                group_id: group_id.to_string(),
                rule_id: rule_id.to_string(),
            })?;
        move_item(&mut group.rules, from, index)
    }
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> EditResult<()> {
    if to >= items.len() {
        return Err(EditError::IndexOutOfRange {
            index: to,
            len: items.len(),
        });
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
